use bank::CaseFile;

pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn format_case_file(rank: usize, case: &CaseFile) -> String {
    format!(
        "#{rank} {}\n   Problem: {}\n   Tech Stack: {}",
        case.team,
        case.problem,
        case.tech.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(30), "00:30");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn test_case_file() {
        let case = CaseFile {
            team: "Debug Detectives".to_string(),
            problem: "Campus waste management system".to_string(),
            tech: vec!["Gemini AI".to_string(), "Firebase".to_string()],
        };

        assert_eq!(
            format_case_file(1, &case),
            "#1 Debug Detectives\n   Problem: Campus waste management system\n   Tech Stack: Gemini AI, Firebase"
        );
    }

    #[test]
    fn test_case_file_no_tech() {
        let case = CaseFile {
            team: "Solo".to_string(),
            problem: "One case".to_string(),
            tech: vec![],
        };

        assert!(format_case_file(10, &case).ends_with("Tech Stack: "));
    }
}
