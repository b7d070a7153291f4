//! The generated-by banner every emitted `.cs` file opens with. The
//! timestamp source is pluggable so golden tests can stub a fixed instant
//! instead of wall-clock time.

pub trait TimestampSource {
    fn now(&self) -> String;
}

/// Used outside tests; callers supply their own clock-backed implementation
/// at the driver boundary rather than this crate reaching for one, since
/// this crate otherwise has no reason to depend on a time crate.
pub struct FixedTimestamp(pub String);

impl TimestampSource for FixedTimestamp {
    fn now(&self) -> String {
        self.0.clone()
    }
}

pub fn render_banner(relative_source_path: &str, timestamps: &dyn TimestampSource) -> Vec<String> {
    vec![
        format!("// <auto-generated from=\"{relative_source_path}\"/>"),
        format!("// generated-at: {}", timestamps.now()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_carries_relative_path_and_stubbed_timestamp() {
        let ts = FixedTimestamp("2026-01-01T00:00:00Z".into());
        let lines = render_banner("widgets/shape.ts", &ts);
        assert_eq!(lines[0], "// <auto-generated from=\"widgets/shape.ts\"/>");
        assert_eq!(lines[1], "// generated-at: 2026-01-01T00:00:00Z");
    }
}
