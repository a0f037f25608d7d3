/// Countries whose requests are always denominated in USD.
///
/// Names are matched exactly against the country directory's display names.
pub const OPEC_MEMBERS: [&str; 15] = [
    "Saudi Arabia",
    "Iran",
    "Iraq",
    "Kuwait",
    "United Arab Emirates",
    "Venezuela",
    "Nigeria",
    "Algeria",
    "Libya",
    "Angola",
    "Ecuador",
    "Gabon",
    "Equatorial Guinea",
    "Congo",
    "Indonesia",
];

pub fn is_opec_member(country: &str) -> bool {
    OPEC_MEMBERS.contains(&country)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_exact_match() {
        assert!(is_opec_member("Saudi Arabia"));
        assert!(is_opec_member("Congo"));
        assert!(!is_opec_member("saudi arabia"));
        assert!(!is_opec_member("France"));
        assert!(!is_opec_member(""));
    }

    #[test]
    fn set_has_fifteen_distinct_members() {
        let mut names = OPEC_MEMBERS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 15);
    }
}
