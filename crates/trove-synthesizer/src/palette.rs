//! Cluster colors

/// Fixed palette, assigned by emission position
pub const PALETTE: [&str; 8] = [
    "#6366f1", // indigo
    "#10b981", // emerald
    "#f59e0b", // amber
    "#ef4444", // red
    "#3b82f6", // blue
    "#8b5cf6", // violet
    "#ec4899", // pink
    "#14b8a6", // teal
];

/// Icon for category clusters
pub const CATEGORY_ICON: &str = "tag";

/// Color for the cluster emitted at `index`
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
