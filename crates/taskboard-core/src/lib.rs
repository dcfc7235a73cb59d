#![deny(warnings)]
pub mod model;
pub mod snapshot;
pub mod store;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "taskboard"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use super::AppInfo;

    #[test]
    fn exposes_static_metadata() {
        assert_eq!(AppInfo::name(), "taskboard");
        assert!(!AppInfo::version().is_empty());
    }
}
