//! Munin field name sanitizing.

/// Turn an arbitrary string into a safe munin field name.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`, as does a leading
/// digit. `root` is reserved by munin and maps to `_root`.
pub fn clean_fieldname(text: &str) -> String {
    if text == "root" {
        return "_root".to_string();
    }

    text.chars()
        .enumerate()
        .map(|(i, c)| {
            let allowed = if i == 0 {
                c.is_ascii_alphabetic() || c == '_'
            } else {
                c.is_ascii_alphanumeric() || c == '_'
            };
            if allowed {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_device_paths() {
        assert_eq!(clean_fieldname("/dev/nvme0n1"), "_dev_nvme0n1");
        assert_eq!(clean_fieldname("/dev/nvme10n2"), "_dev_nvme10n2");
    }

    #[test]
    fn test_root_is_reserved() {
        assert_eq!(clean_fieldname("root"), "_root");
        assert_eq!(clean_fieldname("rooted"), "rooted");
    }

    #[test]
    fn test_edge_inputs() {
        assert_eq!(clean_fieldname(""), "");
        assert_eq!(clean_fieldname("0abc"), "_abc");
        assert_eq!(clean_fieldname("_0abc"), "_0abc");
        assert_eq!(clean_fieldname("disk-é1"), "disk__1");
    }

    #[test]
    fn test_nvme_paths_do_not_collide() {
        let paths = [
            "/dev/nvme0n1",
            "/dev/nvme0n2",
            "/dev/nvme1n1",
            "/dev/nvme10n1",
            "/dev/nvme1n10",
        ];
        let mut keys: Vec<String> = paths.iter().map(|p| clean_fieldname(p)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), paths.len());
    }

    proptest! {
        #[test]
        fn prop_idempotent(s in "\\PC*") {
            let once = clean_fieldname(&s);
            prop_assert_eq!(clean_fieldname(&once), once);
        }

        #[test]
        fn prop_output_is_field_name(s in "\\PC*") {
            let cleaned = clean_fieldname(&s);
            let mut chars = cleaned.chars();
            match chars.next() {
                None => prop_assert!(s.is_empty()),
                Some(first) => {
                    prop_assert!(first.is_ascii_alphabetic() || first == '_');
                    prop_assert!(chars.all(|c| c.is_ascii_alphanumeric() || c == '_'));
                }
            }
        }

        #[test]
        fn prop_preserves_char_count(s in "\\PC*") {
            prop_assume!(s != "root");
            prop_assert_eq!(clean_fieldname(&s).chars().count(), s.chars().count());
        }
    }
}
