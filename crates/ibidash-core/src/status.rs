// ── Status → visual class mapping ──
//
// One lookup table shared by every table renderer, keyed by the kind of
// record and the raw status string. Anything not in the table maps to
// `StatusClass::Pending`.

use strum::Display;

/// The kind of record a status value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusDomain {
    Intent,
    Threat,
    /// Mitigations key on the stringified `enabled` flag.
    Mitigation,
    Component,
}

/// Visual class of a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum StatusClass {
    New,
    UnderEmulation,
    UnderMitigation,
    Reincident,
    Mitigated,
    Detected,
    Processing,
    Fulfilled,
    NotFulfilled,
    Completed,
    InProgress,
    Online,
    Offline,
    Pending,
}

const STATUS_CLASSES: &[(StatusDomain, &str, StatusClass)] = &[
    // Intents
    (StatusDomain::Intent, "fulfilled", StatusClass::Fulfilled),
    (StatusDomain::Intent, "not_fulfilled", StatusClass::NotFulfilled),
    (StatusDomain::Intent, "not-fulfilled", StatusClass::NotFulfilled),
    (StatusDomain::Intent, "new", StatusClass::New),
    (StatusDomain::Intent, "processing", StatusClass::Processing),
    (StatusDomain::Intent, "under_mitigation", StatusClass::UnderMitigation),
    (StatusDomain::Intent, "mitigated", StatusClass::Mitigated),
    // Threats
    (StatusDomain::Threat, "new", StatusClass::New),
    (StatusDomain::Threat, "under_emulation", StatusClass::UnderEmulation),
    (StatusDomain::Threat, "under_mitigation", StatusClass::UnderMitigation),
    (StatusDomain::Threat, "reincident", StatusClass::Reincident),
    (StatusDomain::Threat, "mitigated", StatusClass::Mitigated),
    (StatusDomain::Threat, "detected", StatusClass::Detected),
    // Mitigations
    (StatusDomain::Mitigation, "true", StatusClass::Completed),
    (StatusDomain::Mitigation, "false", StatusClass::InProgress),
    // Components
    (StatusDomain::Component, "Online", StatusClass::Online),
    (StatusDomain::Component, "Offline", StatusClass::Offline),
];

/// Look up the class for `value`; unmapped values are `Pending`.
pub fn status_class(domain: StatusDomain, value: &str) -> StatusClass {
    STATUS_CLASSES
        .iter()
        .find(|(d, v, _)| *d == domain && *v == value)
        .map_or(StatusClass::Pending, |(_, _, class)| *class)
}

/// Human label for a status value.
pub fn status_label(domain: StatusDomain, value: &str) -> String {
    match (domain, value) {
        (StatusDomain::Intent, "fulfilled") => "Fulfilled".into(),
        (StatusDomain::Intent, "not_fulfilled" | "not-fulfilled") => "Not Fulfilled".into(),
        (StatusDomain::Mitigation, "true") => "Enabled".into(),
        (StatusDomain::Mitigation, _) => "Disabled".into(),
        (StatusDomain::Component, _) => value.to_owned(),
        _ => title_case(value),
    }
}

/// `under_emulation` → `Under Emulation`.
///
/// Underscores become spaces and the first character of every word is
/// upper-cased; the rest of the word is left alone.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        let c = if c == '_' { ' ' } else { c };
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}
