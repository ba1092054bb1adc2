//! Canonical join keys for free-text place names.

/// Administrative designations ("Regency", "City") stripped wherever they occur.
pub const ADMIN_DESIGNATIONS: [&str; 2] = ["KABUPATEN", "KOTA"];

/// Reduce a raw place name to its comparable form.
///
/// Missing names become the empty string. Otherwise the name is uppercased,
/// every occurrence of an [`ADMIN_DESIGNATIONS`] entry is removed, runs of
/// whitespace collapse to a single space, and the ends are trimmed.
///
/// Both datasets must be keyed through this same function.
pub fn normalize(raw: Option<&str>) -> String {
    let Some(raw) = raw else { return String::new() };

    let mut name = raw.to_uppercase();
    // A removal can splice a new designation together ("KOKOTATA"), so strip until stable.
    loop {
        let stripped = ADMIN_DESIGNATIONS.iter()
            .fold(name.clone(), |acc, designation| acc.replace(designation, ""));
        if stripped == name { break }
        name = stripped;
    }

    name.split_whitespace().collect::<Vec<_>>().join(" ")
}
