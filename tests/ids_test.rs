//! Tests for folder and drive reference resolution.

use drive_tree::client::DriveScope;
use drive_tree::ids::extract_id;

mod drive_links {
    use super::*;

    #[test]
    fn folder_link_with_user_index() {
        let url = "https://drive.google.com/drive/u/2/folders/1abc123XYZ";
        assert_eq!(extract_id(url).unwrap(), "1abc123XYZ");
    }

    #[test]
    fn file_link_with_suffix() {
        let url = "https://drive.google.com/file/d/1abc123XYZ/view?usp=sharing";
        assert_eq!(extract_id(url).unwrap(), "1abc123XYZ");
    }

    #[test]
    fn open_link() {
        let url = "https://drive.google.com/open?id=1abc123XYZ";
        assert_eq!(extract_id(url).unwrap(), "1abc123XYZ");
    }

    #[test]
    fn malformed_drive_link() {
        assert!(extract_id("https://drive.google.com/").is_err());
        assert!(extract_id("https://drive.google.com/drive/folders/").is_err());
    }
}

mod raw_ids {
    use super::*;

    #[test]
    fn id_with_punctuation() {
        assert_eq!(extract_id("abc-123_XYZ").unwrap(), "abc-123_XYZ");
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(extract_id("\t1abc123XYZ\n").unwrap(), "1abc123XYZ");
    }

    #[test]
    fn invalid_characters() {
        assert!(extract_id("abc 123").is_err());
        assert!(extract_id("abc@123").is_err());
        assert!(extract_id("   ").is_err());
    }
}

mod drive_scope {
    use super::*;

    #[test]
    fn blank_input_selects_personal_namespace() {
        assert_eq!(DriveScope::parse("").unwrap(), DriveScope::Personal);
        assert_eq!(DriveScope::parse("  ").unwrap(), DriveScope::Personal);
    }

    #[test]
    fn drive_id_selects_shared_namespace() {
        assert_eq!(
            DriveScope::parse("0ABcdEF").unwrap(),
            DriveScope::Shared("0ABcdEF".to_string())
        );
        assert_eq!(
            DriveScope::parse("https://drive.google.com/drive/folders/0ABcdEF").unwrap(),
            DriveScope::Shared("0ABcdEF".to_string())
        );
    }

    #[test]
    fn invalid_drive_reference() {
        assert!(DriveScope::parse("not a drive").is_err());
    }
}
