/// Institutions offered on the selection page, in display order.
pub const INSTITUTIONS: [&str; 10] = [
    "Amity University Jaipur",
    "BITS Pilani (Birla Institute of Technology and Science, Pilani)",
    "IIT Bombay (Indian Institute of Technology Bombay)",
    "IIT Delhi (Indian Institute of Technology Delhi)",
    "IIT Jodhpur (Indian Institute of Technology Jodhpur)",
    "IIT Kanpur (Indian Institute of Technology Kanpur)",
    "IIT Madras (Indian Institute of Technology Madras)",
    "MNIT Jaipur (Malaviya National Institute of Technology Jaipur)",
    "University of Rajasthan",
    "UPES (University of Petroleum and Energy Studies)",
];

pub fn institutions() -> &'static [&'static str] {
    &INSTITUTIONS
}

/// Resolves a user's pick: a 1-based list number, an exact name, or a prefix
/// that matches exactly one entry (case-insensitive).
pub fn lookup(selection: &str) -> Option<&'static str> {
    let wanted = selection.trim();
    if wanted.is_empty() {
        return None;
    }

    if let Ok(n) = wanted.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| INSTITUTIONS.get(i)).copied();
    }

    if let Some(exact) = INSTITUTIONS
        .iter()
        .find(|name| name.eq_ignore_ascii_case(wanted))
    {
        return Some(exact);
    }

    let lower = wanted.to_lowercase();
    let mut matches = INSTITUTIONS
        .iter()
        .filter(|name| name.to_lowercase().starts_with(&lower));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}
