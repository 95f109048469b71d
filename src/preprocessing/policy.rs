//! The static imputation table.
//!
//! Every column name maps to exactly one [`Policy`].
//! The lookup is a pure function of the name,
//! so the table can be audited without running the imputer.

/// Area and count columns where a missing cell means "none present".
pub const ZERO_FILL: &[&str] = &[
    "GarageYrBlt", "GarageArea", "GarageCars",
    "BsmtFinSF1", "BsmtFinSF2", "BsmtUnfSF",
    "1stFlrSF", "2ndFlrSF", "LowQualFinSF", "GrLivArea",
    "BsmtFullBath", "BsmtHalfBath", "FullBath", "HalfBath",
    "BedroomAbvGr", "KitchenAbvGr", "TotRmsAbvGrd", "TotalBsmtSF",
    "Fireplaces", "WoodDeckSF", "OpenPorchSF", "EnclosedPorch",
    "3SsnPorch", "ScreenPorch", "PoolArea", "MiscVal", "MoSold", "YrSold",
    "OverallQual", "OverallCond", "YearBuilt", "YearRemodAdd", "MasVnrArea",
];


/// Facility columns where a missing cell means "no such facility".
pub const NONE_FILL: &[&str] = &[
    "GarageType", "GarageFinish", "GarageQual", "GarageCond", "PoolQC",
    "BsmtQual", "BsmtCond", "BsmtExposure", "BsmtFinType1", "BsmtFinType2",
    "Neighborhood", "BldgType", "HouseStyle", "MasVnrType", "FireplaceQu",
    "Fence", "MiscFeature",
];


/// Columns where a missing cell is a data-entry omission.
pub const MODE_FILL: &[&str] = &[
    "Street", "LotShape", "LandContour", "Utilities", "LotConfig",
    "LandSlope", "Condition1", "Condition2", "RoofStyle", "Electrical",
    "Functional", "KitchenQual", "Exterior1st", "Exterior2nd", "SaleType",
    "RoofMatl", "ExterQual", "ExterCond", "Foundation", "Heating",
    "HeatingQC", "CentralAir", "PavedDrive", "SaleCondition",
];


/// The label written into a category-filled cell.
pub const NONE_LABEL: &str = "None";
/// The label of an unknown dwelling type.
pub const UNKNOWN_LABEL: &str = "Unknown";
/// The label written into a missing alley cell.
pub const ALLEY_LABEL: &str = "Pave";


/// Generic strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImputeStrategy {
    /// Missing → `0`.
    Zero,
    /// Missing → `"None"`.
    NoneLabel,
    /// Missing → the most frequent value of the column.
    Mode,
}


/// Column-specific rules that override the generic strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bespoke {
    /// Dwelling class: numeric code → label, missing → `"Unknown"`.
    DwellingClass,
    /// Zoning: mode within the dwelling class of the row.
    ZoningByDwellingClass,
    /// Street frontage: median within the neighborhood of the row.
    FrontageByNeighborhood,
    /// Lot area: truncated to an integer.
    TruncateLotArea,
    /// Alley access: missing → `"Pave"`.
    PavedAlley,
    /// Masonry veneer area: truncated to an integer.
    TruncateMasonryArea,
}


impl Bespoke {
    /// The order in which the rules run.
    /// The zoning rule groups by the dwelling class,
    /// so the class is converted first.
    pub const ORDER: [Bespoke; 6] = [
        Bespoke::DwellingClass,
        Bespoke::ZoningByDwellingClass,
        Bespoke::FrontageByNeighborhood,
        Bespoke::TruncateLotArea,
        Bespoke::PavedAlley,
        Bespoke::TruncateMasonryArea,
    ];


    /// The column this rule writes to.
    pub fn column(&self) -> &'static str {
        match self {
            Self::DwellingClass => "MSSubClass",
            Self::ZoningByDwellingClass => "MSZoning",
            Self::FrontageByNeighborhood => "LotFrontage",
            Self::TruncateLotArea => "LotArea",
            Self::PavedAlley => "Alley",
            Self::TruncateMasonryArea => "MasVnrArea",
        }
    }


    /// The column whose value defines the group of a row, if any.
    pub fn group_by(&self) -> Option<&'static str> {
        match self {
            Self::ZoningByDwellingClass => Some("MSSubClass"),
            Self::FrontageByNeighborhood => Some("Neighborhood"),
            _ => None,
        }
    }
}


/// The imputation class of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// One of the generic strategies.
    Generic(ImputeStrategy),
    /// Handled by a column-specific rule,
    /// exempt from the generic pass.
    Bespoke(Bespoke),
    /// Not in the table.
    /// The imputer falls back on the column type.
    Unlisted,
}


/// Returns the imputation class of `column`.
pub fn policy_for(column: &str) -> Policy {
    if let Some(rule) = Bespoke::ORDER.iter().find(|r| r.column() == column) {
        return Policy::Bespoke(*rule);
    }
    // `MasVnrArea` is listed as zero-fill as well;
    // the bespoke rule above wins.
    if ZERO_FILL.contains(&column) {
        Policy::Generic(ImputeStrategy::Zero)
    } else if NONE_FILL.contains(&column) {
        Policy::Generic(ImputeStrategy::NoneLabel)
    } else if MODE_FILL.contains(&column) {
        Policy::Generic(ImputeStrategy::Mode)
    } else {
        Policy::Unlisted
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_lookup() {
        let cases = [
            ("GarageArea", Policy::Generic(ImputeStrategy::Zero)),
            ("PoolQC", Policy::Generic(ImputeStrategy::NoneLabel)),
            ("Electrical", Policy::Generic(ImputeStrategy::Mode)),
            ("MSZoning", Policy::Bespoke(Bespoke::ZoningByDwellingClass)),
            ("MasVnrArea", Policy::Bespoke(Bespoke::TruncateMasonryArea)),
            ("Alley", Policy::Bespoke(Bespoke::PavedAlley)),
            ("Street_Name", Policy::Unlisted),
        ];
        for (column, expect) in cases {
            let result = policy_for(column);
            assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
        }
    }


    #[test]
    fn test_grouped_rules() {
        let result = Bespoke::ZoningByDwellingClass.group_by();
        assert_eq!(Some("MSSubClass"), result);
        let result = Bespoke::FrontageByNeighborhood.group_by();
        assert_eq!(Some("Neighborhood"), result);
        assert!(Bespoke::PavedAlley.group_by().is_none());
    }


    #[test]
    fn test_lists_are_disjoint() {
        for name in ZERO_FILL {
            assert!(!NONE_FILL.contains(name) && !MODE_FILL.contains(name));
        }
        for name in NONE_FILL {
            assert!(!MODE_FILL.contains(name));
        }
    }
}
