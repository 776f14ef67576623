mod input;
mod report;


pub use input::{load_dataset, parse_records, Dataset, FieldBindings};
pub use report::{
    write_report, AssignmentEntry, ReportManifest, ReportStats, RunReport, REPORT_VERSION,
};
