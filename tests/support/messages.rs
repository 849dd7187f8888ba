//! Custom writer persisting runner events as envelope lines.
//!
//! For every scenario the writer emits a `testCase`, `testCaseStarted`, and
//! `testCaseFinished` envelope, plus run-level start/finish markers, one JSON
//! object per line. The report pipeline consumes exactly this log, so the
//! envelope types come from the library and round-trip by construction.
//! Write failures are logged, never propagated: losing a log line must not
//! fail the run itself.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write as _};
use std::path::Path;

use async_trait::async_trait;
use cucumber::{Event, cli, event, gherkin, parser, writer};
use pitwall::report::{
    Envelope, Location, Tag, TestCase, TestCaseFinished, TestCaseStarted, TestResult, Timestamp,
};

/// Case bookkeeping between a scenario's start and finish events.
struct ActiveCase {
    started_id: String,
    failed: bool,
}

/// Cucumber writer emitting line-delimited envelopes.
pub struct MessageWriter {
    out: BufWriter<File>,
    next_id: u64,
    active: HashMap<(String, u64), ActiveCase>,
    failed_any: bool,
}

impl MessageWriter {
    /// Start a fresh log at `path`, truncating any previous run's log.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be created.
    pub fn create(path: &Path) -> std::io::Result<Self> {
        Ok(Self::with_file(File::create(path)?))
    }

    /// Append to the log at `path`, creating it when absent.
    ///
    /// Used by the second suite of a run so both suites land in one log.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be opened.
    pub fn append(path: &Path) -> std::io::Result<Self> {
        Ok(Self::with_file(
            OpenOptions::new().create(true).append(true).open(path)?,
        ))
    }

    fn with_file(file: File) -> Self {
        Self {
            out: BufWriter::new(file),
            next_id: 0,
            active: HashMap::new(),
            failed_any: false,
        }
    }

    fn emit(&mut self, envelope: &Envelope) {
        match serde_json::to_string(envelope) {
            Ok(line) => {
                if let Err(error) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
                    tracing::error!("failed to write envelope: {error}");
                }
            }
            Err(error) => tracing::error!("failed to serialise envelope: {error}"),
        }
    }

    fn mark_failed(&mut self, key: &(String, u64)) {
        self.failed_any = true;
        if let Some(case) = self.active.get_mut(key) {
            case.failed = true;
        }
    }

    fn scenario_event<W>(
        &mut self,
        feature: &gherkin::Feature,
        scenario: &gherkin::Scenario,
        ev: &event::RetryableScenario<W>,
    ) {
        use event::{Hook, Scenario, Step};

        let uri = feature
            .path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        let line = scenario.position.line as u64;
        let key = (uri.clone(), line);
        match &ev.event {
            Scenario::Started => {
                self.next_id += 1;
                let case_id = format!("tc-{}", self.next_id);
                let started_id = format!("{case_id}-started");
                let tags = feature
                    .tags
                    .iter()
                    .chain(&scenario.tags)
                    .map(|tag| Tag {
                        name: format!("@{tag}"),
                    })
                    .collect();
                self.emit(&Envelope::test_case(TestCase {
                    id: case_id.clone(),
                    uri,
                    name: scenario.name.clone(),
                    location: Location { line },
                    tags,
                }));
                self.emit(&Envelope::test_case_started(TestCaseStarted {
                    id: started_id.clone(),
                    test_case_id: case_id,
                    timestamp: Some(Timestamp::now()),
                }));
                self.active.insert(key, ActiveCase {
                    started_id,
                    failed: false,
                });
            }
            Scenario::Step(_, Step::Failed(..)) | Scenario::Background(_, Step::Failed(..)) => {
                self.mark_failed(&key);
            }
            Scenario::Hook(_, Hook::Failed(..)) => self.mark_failed(&key),
            Scenario::Finished => {
                if let Some(case) = self.active.remove(&key) {
                    let will_be_retried =
                        case.failed && ev.retries.is_some_and(|retries| retries.left > 0);
                    let status = if case.failed { "FAILED" } else { "PASSED" };
                    self.emit(&Envelope::test_case_finished(TestCaseFinished {
                        test_case_started_id: case.started_id,
                        will_be_retried,
                        test_result: TestResult {
                            status: status.to_owned(),
                        },
                        timestamp: Some(Timestamp::now()),
                    }));
                }
            }
            _ => {}
        }
    }
}

#[async_trait(?Send)]
impl<W: cucumber::World + std::fmt::Debug> writer::Writer<W> for MessageWriter {
    type Cli = cli::Empty;

    async fn handle_event(
        &mut self,
        event: parser::Result<Event<event::Cucumber<W>>>,
        _cli: &Self::Cli,
    ) {
        use event::{Cucumber, Feature, Rule};

        let event = match event {
            Ok(event) => event,
            Err(error) => {
                tracing::error!("feature parse error: {error}");
                self.failed_any = true;
                return;
            }
        };
        match event.into_inner() {
            Cucumber::Started => self.emit(&Envelope::test_run_started(Timestamp::now())),
            Cucumber::Feature(feature, ev) => match ev {
                Feature::Scenario(scenario, ev) => {
                    self.scenario_event(&feature, &scenario, &ev);
                }
                Feature::Rule(_, Rule::Scenario(scenario, ev)) => {
                    self.scenario_event(&feature, &scenario, &ev);
                }
                _ => {}
            },
            Cucumber::Finished => {
                self.emit(&Envelope::test_run_finished(
                    !self.failed_any,
                    Timestamp::now(),
                ));
            }
            _ => {}
        }
    }
}

impl writer::NonTransforming for MessageWriter {}
