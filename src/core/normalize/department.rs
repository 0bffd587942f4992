//! Department canonicalization
//!
//! Checkout addresses carry free-text department names. Partners only accept
//! the official spelling, so known variants are folded onto it here.

/// Known variants, already trimmed and upper-cased, and their canonical name
const DEPARTMENT_ALIASES: &[(&str, &str)] = &[
    ("BOGOTÁ, D.C.", "BOGOTÁ, D.C."),
    ("BOGOTA, D.C.", "BOGOTÁ, D.C."),
    ("BOGOTÁ", "BOGOTÁ, D.C."),
    ("BOGOTA", "BOGOTÁ, D.C."),
    ("BOGOTA / PUENTE ARANDA", "BOGOTÁ, D.C."),
    ("BARRANQUILLA", "ATLÁNTICO"),
    ("BARRAQUILLA", "ATLÁNTICO"),
    ("SOACHA", "CUNDINAMARCA"),
    ("CHOCONTÁ", "CUNDINAMARCA"),
    ("CHOCONTA", "CUNDINAMARCA"),
];

/// Returns the canonical department name for a raw value
///
/// The value is trimmed and upper-cased first. Values without a known alias
/// pass through in that upper-cased form.
///
/// # Examples
///
/// ```
/// use farmu_reports::core::normalize::canonicalize_department;
///
/// assert_eq!(canonicalize_department("Bogota"), "BOGOTÁ, D.C.");
/// assert_eq!(canonicalize_department("medellin"), "MEDELLIN");
/// ```
pub fn canonicalize_department(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    DEPARTMENT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == upper)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or(upper)
}
