//! Upload path derivation for plant and observation images.
//!
//! Images are addressed by `{prefix}/{owner_id}/{filename}`. When a record has
//! no owner yet the owner segment is [`UNKNOWN_OWNER`]. Only the final
//! component of the submitted filename is kept, so a client cannot steer the
//! path into another owner's directory.

/// Owner segment used when the record has no owner.
pub const UNKNOWN_OWNER: &str = "unknown";

/// Directory prefix for plant images.
pub const PLANT_PREFIX: &str = "plants";

/// Directory prefix for observation images.
pub const OBSERVATION_PREFIX: &str = "observations";

/// Upload path for a plant image.
#[must_use]
pub fn plant_upload_to(owner_id: Option<i64>, filename: &str) -> String {
    upload_to(PLANT_PREFIX, owner_id, filename)
}

/// Upload path for an observation image.
#[must_use]
pub fn observation_upload_to(owner_id: Option<i64>, filename: &str) -> String {
    upload_to(OBSERVATION_PREFIX, owner_id, filename)
}

fn upload_to(prefix: &str, owner_id: Option<i64>, filename: &str) -> String {
    let owner = owner_id.map_or_else(|| UNKNOWN_OWNER.to_string(), |id| id.to_string());
    format!("{prefix}/{owner}/{}", base_name(filename))
}

/// Strip any directory components (either separator style) from a filename.
#[must_use]
pub fn base_name(filename: &str) -> &str {
    filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim()
}

/// Public URL for a stored upload path under the configured media prefix.
#[must_use]
pub fn media_url(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        return path.to_string();
    }
    if prefix.ends_with('/') {
        format!("{prefix}{path}")
    } else {
        format!("{prefix}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn plant_path_uses_owner_id() {
        assert_eq!(plant_upload_to(Some(42), "fern.jpg"), "plants/42/fern.jpg");
    }

    #[test]
    fn observation_path_uses_owner_id() {
        assert_eq!(
            observation_upload_to(Some(7), "meadow.png"),
            "observations/7/meadow.png"
        );
    }

    #[test]
    fn missing_owner_falls_back_to_unknown() {
        assert_eq!(plant_upload_to(None, "fern.jpg"), "plants/unknown/fern.jpg");
        assert_eq!(
            observation_upload_to(None, "fern.jpg"),
            "observations/unknown/fern.jpg"
        );
    }

    #[rstest]
    #[case("fern.jpg", "fern.jpg")]
    #[case("../../etc/passwd", "passwd")]
    #[case("C:\\photos\\oak.jpeg", "oak.jpeg")]
    #[case("dir/", "")]
    fn base_name_drops_directories(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(base_name(input), expected);
    }

    #[rstest]
    #[case("/media/", "plants/1/a.jpg", "/media/plants/1/a.jpg")]
    #[case("https://cdn.example.com/m", "plants/1/a.jpg", "https://cdn.example.com/m/plants/1/a.jpg")]
    #[case("", "plants/1/a.jpg", "plants/1/a.jpg")]
    fn media_url_joins_prefix(#[case] prefix: &str, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(media_url(prefix, path), expected);
    }
}
