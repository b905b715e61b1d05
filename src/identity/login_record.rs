//! Parser for the platform client's login-record file.
//!
//! # Responsibilities
//! - Scan the line-oriented key/value pairs of `loginusers.vdf`
//! - Extract the active account identifier
//!
//! # Design Decisions
//! - First matching identifier wins. The file lists cached accounts with the
//!   most recently active one first, so "first match" is the documented
//!   stand-in for "most recent". On multi-account machines this heuristic can
//!   pick the wrong account; the format gives us nothing stronger to key on.
//! - The surrounding VDF structure is not parsed; only quoted key/value
//!   lines are inspected.

/// The active account record extracted from the login file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRecord {
    pub steam_id: String,
}

/// Scan file contents for the first account identifier entry.
///
/// Returns `None` when no identifier field is present.
pub fn parse_login_record(contents: &str) -> Option<LoginRecord> {
    for line in contents.lines() {
        let mut fields = line.split('"').skip(1).step_by(2);
        let key = match fields.next() {
            Some(k) => k,
            None => continue,
        };
        if !key.eq_ignore_ascii_case("steamid") {
            continue;
        }
        if let Some(value) = fields.next() {
            let value = value.trim();
            if !value.is_empty() {
                return Some(LoginRecord {
                    steam_id: value.to_string(),
                });
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
"users"
{
	"76561198012345678"
	{
		"AccountName"	"first_account"
		"SteamID"	"76561198012345678"
		"MostRecent"	"1"
	}
	"76561198087654321"
	{
		"AccountName"	"second_account"
		"SteamID"	"76561198087654321"
		"MostRecent"	"0"
	}
}
"#;

    #[test]
    fn test_first_identifier_wins() {
        let record = parse_login_record(SAMPLE).unwrap();
        assert_eq!(record.steam_id, "76561198012345678");
    }

    #[test]
    fn test_key_match_is_case_insensitive() {
        let record = parse_login_record("\t\"steamid\"\t\"42\"").unwrap();
        assert_eq!(record.steam_id, "42");
    }

    #[test]
    fn test_no_identifier_field() {
        assert!(parse_login_record("\"users\"\n{\n}\n").is_none());
    }

    #[test]
    fn test_empty_value_is_not_a_match() {
        assert!(parse_login_record("\"SteamID\"\t\"\"").is_none());
    }

    #[test]
    fn test_unquoted_noise_is_ignored() {
        assert!(parse_login_record("steamid without quotes\n").is_none());
    }
}
