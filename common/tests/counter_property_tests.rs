// Property-based tests for counter persistence

use common::counter::CounterFile;
use common::errors::CounterError;
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

proptest! {
    /// *For any* value, writing then reading returns the same value.
    #[test]
    fn property_write_then_read_round_trips(value in any::<u64>()) {
        let dir = TempDir::new().unwrap();
        let counter = CounterFile::new(dir.path().join("number.txt"));

        counter.write(value).unwrap();

        prop_assert_eq!(counter.read().unwrap(), value);
    }

    /// *For any* surrounding whitespace, reads parse the trimmed digits.
    #[test]
    fn property_read_is_trim_tolerant(
        value in 0u64..1_000_000_000,
        prefix in "[ \t\r\n]{0,3}",
        suffix in "[ \t\r\n]{0,3}",
    ) {
        let dir = TempDir::new().unwrap();
        let counter = CounterFile::new(dir.path().join("number.txt"));

        fs::write(counter.path(), format!("{prefix}{value}{suffix}")).unwrap();

        prop_assert_eq!(counter.read().unwrap(), value);
    }

    /// *For any* non-numeric content, the read fails and the file is left
    /// exactly as it was.
    #[test]
    fn property_non_numeric_content_is_rejected_unchanged(content in "[a-z!? ]{1,16}") {
        let dir = TempDir::new().unwrap();
        let counter = CounterFile::new(dir.path().join("number.txt"));

        fs::write(counter.path(), &content).unwrap();

        prop_assert!(
            matches!(counter.read(), Err(CounterError::Parse { .. })),
            "expected a Parse error"
        );
        prop_assert_eq!(fs::read_to_string(counter.path()).unwrap(), content);
    }

    /// *For any* value, the persisted form is the bare decimal digits with
    /// no trailing whitespace.
    #[test]
    fn property_written_form_is_bare_decimal(value in any::<u64>()) {
        let dir = TempDir::new().unwrap();
        let counter = CounterFile::new(dir.path().join("number.txt"));

        counter.write(value).unwrap();

        prop_assert_eq!(
            fs::read_to_string(counter.path()).unwrap(),
            value.to_string()
        );
    }
}
