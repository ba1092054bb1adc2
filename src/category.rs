use std::fmt;

/// Fill colour for regions without a usable cluster id.
pub const UNMATCHED_COLOR: &str = "#cccccc";

/// Display label for summary rows whose cluster id has no category.
pub const UNKNOWN_CATEGORY: &str = "Tidak Diketahui";

/// Food-security category assigned to each cluster id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryLabel {
    SangatTahan,  // 0
    AgakTahan,    // 1
    AgakRentan,   // 2
    Rentan,       // 3
    Tahan,        // 4
    SangatRentan, // 5
}

impl CategoryLabel {
    /// Every label, indexed by cluster id.
    pub const ALL: [CategoryLabel; 6] = [
        CategoryLabel::SangatTahan,
        CategoryLabel::AgakTahan,
        CategoryLabel::AgakRentan,
        CategoryLabel::Rentan,
        CategoryLabel::Tahan,
        CategoryLabel::SangatRentan,
    ];

    pub fn from_cluster(cluster: i64) -> Option<Self> {
        usize::try_from(cluster).ok()
            .and_then(|i| Self::ALL.get(i))
            .copied()
    }

    pub fn cluster(&self) -> i64 {
        match self {
            CategoryLabel::SangatTahan => 0,
            CategoryLabel::AgakTahan => 1,
            CategoryLabel::AgakRentan => 2,
            CategoryLabel::Rentan => 3,
            CategoryLabel::Tahan => 4,
            CategoryLabel::SangatRentan => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryLabel::SangatTahan => "Sangat Tahan",
            CategoryLabel::AgakTahan => "Agak Tahan",
            CategoryLabel::AgakRentan => "Agak Rentan",
            CategoryLabel::Rentan => "Rentan",
            CategoryLabel::Tahan => "Tahan",
            CategoryLabel::SangatRentan => "Sangat Rentan",
        }
    }

    /// Choropleth fill colour.
    pub fn color(&self) -> &'static str {
        match self {
            CategoryLabel::SangatTahan => "#f4a261",
            CategoryLabel::AgakTahan => "#52b69a",
            CategoryLabel::AgakRentan => "#2d6a4f",
            CategoryLabel::Rentan => "#d62828",
            CategoryLabel::Tahan => "#f4d35e",
            CategoryLabel::SangatRentan => "#264653",
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category label for a cluster id; missing and out-of-range ids have none.
pub fn label(cluster: Option<i64>) -> Option<&'static str> {
    cluster.and_then(CategoryLabel::from_cluster).map(|category| category.as_str())
}

/// Fill colour for a cluster id, grey when it has no category.
pub fn color(cluster: Option<i64>) -> &'static str {
    cluster.and_then(CategoryLabel::from_cluster).map_or(UNMATCHED_COLOR, |category| category.color())
}
