//! Capability checks and their classification

use super::probe::RuntimeProbe;
use super::report::Finding;

/// Module names OPcache has registered under across PHP versions
pub const OPCACHE_MODULES: &[&str] = &["Zend OPcache", "opcache"];

/// Callable only when OPcache is actually usable
pub const OPCACHE_STATUS_FUNCTION: &str = "opcache_get_status";

/// Exposed by PHP-FPM only
pub const FPM_FLUSH_FUNCTION: &str = "fastcgi_finish_request";

/// Functions the checks need to know about
pub const PROBED_FUNCTIONS: &[&str] = &[OPCACHE_STATUS_FUNCTION, FPM_FLUSH_FUNCTION];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
    Required,
    Optional,
}

/// A named extension that must, or should, be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityCheck {
    pub name: String,
    pub criticality: Criticality,
}

impl CapabilityCheck {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            criticality: Criticality::Required,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            criticality: Criticality::Optional,
        }
    }

    /// `None` when the extension is loaded
    pub fn evaluate(&self, probe: &dyn RuntimeProbe) -> Option<Finding> {
        if probe.has_extension(&self.name) {
            return None;
        }
        Some(match self.criticality {
            Criticality::Required => Finding::error(format!("{} missing (critical)", self.name)),
            Criticality::Optional => Finding::warning(format!("{} missing (optional)", self.name)),
        })
    }
}

/// Missing OPcache is fatal; loaded without its status function only degrades
pub fn check_opcache(probe: &dyn RuntimeProbe) -> Option<Finding> {
    let loaded = OPCACHE_MODULES.iter().any(|name| probe.has_extension(name));
    if !loaded {
        return Some(Finding::error("opcache missing (critical)"));
    }
    if !probe.has_function(OPCACHE_STATUS_FUNCTION) {
        return Some(Finding::warning("opcache loaded but non-functional"));
    }
    None
}

/// Without `fastcgi_finish_request` the runtime is not PHP-FPM; worth a warning only
pub fn check_process_mode(probe: &dyn RuntimeProbe) -> Option<Finding> {
    if probe.has_function(FPM_FLUSH_FUNCTION) {
        None
    } else {
        Some(Finding::warning(format!(
            "{FPM_FLUSH_FUNCTION} unavailable (PHP-FPM may not be handling requests)"
        )))
    }
}

/// Run every runtime check in report order: required, optional, OPcache, process mode
pub fn run_all(required: &[String], optional: &[String], probe: &dyn RuntimeProbe) -> Vec<Finding> {
    let capabilities = required
        .iter()
        .map(|name| CapabilityCheck::required(name.as_str()))
        .chain(optional.iter().map(|name| CapabilityCheck::optional(name.as_str())));

    capabilities
        .filter_map(|check| check.evaluate(probe))
        .chain(check_opcache(probe))
        .chain(check_process_mode(probe))
        .collect()
}
