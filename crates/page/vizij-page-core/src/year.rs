//! Footer copyright year.

use crate::config::Config;
use crate::host::{Calendar, Document};
use crate::ids::ElementId;
use crate::outputs::Outputs;

/// Write the current year into the year placeholder, if the page has one.
pub fn update_year(
    cfg: &Config,
    doc: &dyn Document,
    calendar: &dyn Calendar,
    out: &mut Outputs,
) -> Option<ElementId> {
    let el = doc.element_by_id(&cfg.selectors.year_id)?;
    out.set_text(el, calendar.current_year().to_string());
    Some(el)
}
