pub const TOP10_PATH: &str = "/api/top10";
pub const FORCE_REVEAL_PATH: &str = "/api/force-reveal";
pub const RESTART_PATH: &str = "/api/restart";
pub const STATUS_PATH: &str = "/api/status";

pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn top10(&self) -> String {
        self.join(TOP10_PATH)
    }

    pub fn force_reveal(&self) -> String {
        self.join(FORCE_REVEAL_PATH)
    }

    pub fn restart(&self) -> String {
        self.join(RESTART_PATH)
    }

    pub fn status(&self) -> String {
        self.join(STATUS_PATH)
    }

    fn join(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}
