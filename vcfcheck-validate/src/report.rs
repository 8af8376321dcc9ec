use log::{error, warn};

use vcfcheck_core::errors::VcfError;

///
/// Destination of every violation found during a run. Rendering, aggregation and
/// persistence are up to the implementation.
///
pub trait ReportWriter {
    fn write_error(&mut self, error: &VcfError);

    fn write_warning(&mut self, error: &VcfError);
}

///
/// Sends violations to the `log` facade: errors at `error` level, warnings at `warn`.
///
#[derive(Debug, Default)]
pub struct LogReportWriter;

impl ReportWriter for LogReportWriter {
    fn write_error(&mut self, err: &VcfError) {
        error!("{}", err);
    }

    fn write_warning(&mut self, err: &VcfError) {
        warn!("{} (warning)", err);
    }
}

///
/// Keeps every violation in memory, in the order it was reported.
///
#[derive(Debug, Default, Clone)]
pub struct CollectingReportWriter {
    pub errors: Vec<VcfError>,
    pub warnings: Vec<VcfError>,
}

impl ReportWriter for CollectingReportWriter {
    fn write_error(&mut self, error: &VcfError) {
        self.errors.push(error.clone());
    }

    fn write_warning(&mut self, error: &VcfError) {
        self.warnings.push(error.clone());
    }
}

impl<W: ReportWriter + ?Sized> ReportWriter for &mut W {
    fn write_error(&mut self, error: &VcfError) {
        (**self).write_error(error);
    }

    fn write_warning(&mut self, error: &VcfError) {
        (**self).write_warning(error);
    }
}
