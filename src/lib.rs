//! fedscan — maps FedRAMP moderate baseline controls to the
//! ComplianceAsCode rules that reference them.
//!
//! A run is four sequential steps sharing one scoped workspace:
//! 1. Download the published FedRAMP baseline workbook.
//! 2. Extract the moderate-baseline control identifiers.
//! 3. Clone the ComplianceAsCode content repository.
//! 4. Report which `rule.yml` files reference each control.

pub mod content;
pub mod matcher;
pub mod sheet;
pub mod workspace;
