pub struct Icons;

impl Icons {
    pub const TREE: &str = "🌳";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const LINK: &str = "🔗";
    pub const ARROW: &str = "➡️";
    pub const MOVE: &str = "↪️";
    pub const GAP: &str = "⬚";
    pub const QUANT: &str = "∀";
    pub const PERSON: &str = "👤";
    pub const GEAR: &str = "⚙️";
}
