use std::sync::Arc;

use log::{debug, info};

use vcfcheck_core::errors::{Result, VcfError};
use vcfcheck_core::models::{Record, Source};

use crate::config::ValidatorConfig;
use crate::policy::{MandatoryPolicy, OptionalPolicy, Severity, ValidationPolicy};
use crate::report::ReportWriter;
use crate::state::ParsingState;

///
/// Counts of one run.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub errors: usize,
    pub warnings: usize,
    pub records: usize,
    /// The run ended early because of a mandatory violation and `level = "stop"`.
    pub stopped: bool,
}

impl ValidationSummary {
    pub fn is_valid(&self) -> bool {
        self.errors == 0
    }
}

///
/// Runs a set of policies over one file and sends every violation to a [ReportWriter].
///
/// Each policy gets its own [ParsingState], so the policies never share a cache. Records
/// that could not be built are reported as errors, since their construction checks are
/// mandatory.
///
pub struct Validator<W: ReportWriter> {
    config: ValidatorConfig,
    policies: Vec<Box<dyn ValidationPolicy>>,
    writer: W,
}

impl<W: ReportWriter> Validator<W> {
    pub fn new(config: ValidatorConfig, writer: W) -> Self {
        let mut policies: Vec<Box<dyn ValidationPolicy>> = vec![Box::new(MandatoryPolicy)];
        if config.level.runs_advisory_checks() {
            policies.push(Box::new(OptionalPolicy));
        }
        Self::with_policies(config, writer, policies)
    }

    pub fn with_policies(
        config: ValidatorConfig,
        writer: W,
        policies: Vec<Box<dyn ValidationPolicy>>,
    ) -> Self {
        Validator {
            config,
            policies,
            writer,
        }
    }

    pub fn policies(&self) -> impl Iterator<Item = &str> {
        self.policies.iter().map(|policy| policy.name())
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    ///
    /// Validate one file.
    ///
    /// # Arguments
    /// - `source`: the file-level context built from the meta section
    /// - `records`: the body records in file order, or the violation that prevented
    ///   building each of them
    ///
    pub fn validate<I>(&mut self, source: Arc<Source>, records: I) -> ValidationSummary
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        info!(
            "Validating '{}' ({}) with policies: {}",
            source.name,
            source.version(),
            self.policies().collect::<Vec<_>>().join(", ")
        );

        let header_end = source
            .categories()
            .flat_map(|category| source.meta_entries(category))
            .map(|entry| entry.line)
            .max()
            .unwrap_or(0);

        let mut states: Vec<ParsingState> = self
            .policies
            .iter()
            .map(|_| {
                let mut state = ParsingState::new(Arc::clone(&source));
                state.set_line(header_end);
                state
            })
            .collect();
        let mut summary = ValidationSummary::default();

        for i in 0..self.policies.len() {
            let result = self.policies[i].check_meta_section(&states[i]);
            if self.report(i, result, &mut summary) {
                return summary;
            }
        }

        let mut last_line = header_end;
        for item in records {
            summary.records += 1;
            let record = match item {
                Ok(record) => record,
                Err(err) => {
                    last_line = err.line();
                    if self.report_error(&err, &mut summary) {
                        return summary;
                    }
                    continue;
                }
            };

            last_line = record.line;
            for (i, state) in states.iter_mut().enumerate() {
                state.set_line(record.line);
                let result = self.policies[i].check_body_entry(state, &record);
                if self.report(i, result, &mut summary) {
                    return summary;
                }
            }
        }

        for (i, state) in states.iter_mut().enumerate() {
            state.set_line(last_line);
            debug!(
                "Policy '{}' scanned the meta section {} time(s) for {} distinct declarations",
                self.policies[i].name(),
                state.cache().header_scans(),
                state.cache().len()
            );
            let result = self.policies[i].check_body_section(state);
            if self.report(i, result, &mut summary) {
                return summary;
            }
        }

        info!(
            "Finished '{}': {} record(s), {} error(s), {} warning(s)",
            source.name, summary.records, summary.errors, summary.warnings
        );
        summary
    }

    /// Returns whether the run must stop.
    fn report(&mut self, policy: usize, result: Result<()>, summary: &mut ValidationSummary) -> bool {
        let Err(err) = result else {
            return false;
        };

        match self.policies[policy].severity() {
            Severity::Error => self.report_error(&err, summary),
            Severity::Warning => {
                debug!("Policy '{}' raised {}", self.policies[policy].name(), err.kind());
                self.writer.write_warning(&err);
                summary.warnings += 1;
                false
            }
        }
    }

    fn report_error(&mut self, err: &VcfError, summary: &mut ValidationSummary) -> bool {
        debug!("Reporting {} as an error", err.kind());
        self.writer.write_error(err);
        summary.errors += 1;

        if self.config.level.stops_at_first_error() {
            info!("Stopping at line {} after the first error", err.line());
            summary.stopped = true;
            return true;
        }
        false
    }
}
