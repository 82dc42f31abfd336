use std::str::FromStr;

use serde::Serialize;

use crate::Error;

/// The two disjoint groups of decision-making bodies the advanced search
/// form exposes as separate checkbox sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CourtCategory {
    Courts,
    Tribunals,
}

impl CourtCategory {
    pub const ALL: [CourtCategory; 2] = [CourtCategory::Courts, CourtCategory::Tribunals];

    /// Form field name for this category. The "group enabled" flag uses the
    /// same name with a leading underscore.
    pub fn param_name(&self) -> &'static str {
        match self {
            CourtCategory::Courts => "courts",
            CourtCategory::Tribunals => "tribunals",
        }
    }

    pub fn flag_name(&self) -> &'static str {
        match self {
            CourtCategory::Courts => "_courts",
            CourtCategory::Tribunals => "_tribunals",
        }
    }

    /// The embedded directory entries for this category, in form order.
    pub fn entries(&self) -> &'static [Court] {
        match self {
            CourtCategory::Courts => COURTS,
            CourtCategory::Tribunals => TRIBUNALS,
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Looks up a court or tribunal by its 1-based position in the table.
    pub fn resolve(&self, ordinal: i64) -> Result<&'static Court, Error> {
        let entries = self.entries();
        if ordinal < 1 || ordinal as usize > entries.len() {
            return Err(Error::OrdinalOutOfRange {
                category: *self,
                ordinal,
                count: entries.len(),
            });
        }
        Ok(&entries[(ordinal - 1) as usize])
    }
}

impl std::fmt::Display for CourtCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.param_name())
    }
}

impl FromStr for CourtCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "courts" => Ok(CourtCategory::Courts),
            "tribunals" => Ok(CourtCategory::Tribunals),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// Resolves `(category, ordinal)` where the category is given by name.
pub fn resolve(category: &str, ordinal: i64) -> Result<&'static Court, Error> {
    category.parse::<CourtCategory>()?.resolve(ordinal)
}

/// A court or tribunal as the search form identifies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Court {
    pub id: &'static str,
    pub name: &'static str,
}

// Ids come from the advanced search form. Courts and tribunals are kept
// apart because the form submits them under different field names.
pub const COURTS: &[Court] = &[
    Court { id: "54a634063004de94513d827a", name: "Children's Court" },
    Court { id: "54a634063004de94513d827b", name: "Compensation Court" },
    Court { id: "54a634063004de94513d8278", name: "Court of Appeal" },
    Court { id: "54a634063004de94513d8279", name: "Court of Criminal Appeal" },
    Court { id: "54a634063004de94513d827c", name: "District Court" },
    Court { id: "54a634063004de94513d827d", name: "Drug Court" },
    Court { id: "54a634063004de94513d828e", name: "Industrial Court" },
    Court {
        id: "54a634063004de94513d8285",
        name: "Industrial Relations Commission (Commissioners)",
    },
    Court {
        id: "54a634063004de94513d827e",
        name: "Industrial Relations Commission (Judges)",
    },
    Court {
        id: "54a634063004de94513d827f",
        name: "Land and Environment Court (Commissioners)",
    },
    Court {
        id: "54a634063004de94513d8286",
        name: "Land and Environment Court (Judges)",
    },
    Court { id: "54a634063004de94513d8280", name: "Local Court" },
    Court { id: "54a634063004de94513d8281", name: "Supreme Court" },
];

pub const TRIBUNALS: &[Court] = &[
    Court {
        id: "54a634063004de94513d8282",
        name: "Administrative Decisions Tribunal (Appeal Panel)",
    },
    Court {
        id: "54a634063004de94513d8287",
        name: "Administrative Decisions Tribunal (Divisions)",
    },
    Court {
        id: "54a634063004de94513d8289",
        name: "Civil and Administrative Tribunal (Administrative and Equal Opportunity Division)",
    },
    Court {
        id: "54a634063004de94513d828d",
        name: "Civil and Administrative Tribunal (Appeal Panel)",
    },
    Court {
        id: "54a634063004de94513d828b",
        name: "Civil and Administrative Tribunal (Consumer and Commercial Division)",
    },
    Court {
        id: "173b71a8beab2951cc1fab8d",
        name: "Civil and Administrative Tribunal (Enforcement)",
    },
    Court {
        id: "54a634063004de94513d828c",
        name: "Civil and Administrative Tribunal (Guardianship Division)",
    },
    Court {
        id: "54a634063004de94513d828a",
        name: "Civil and Administrative Tribunal (Occupational Division)",
    },
    Court { id: "54a634063004de94513d8283", name: "Dust Diseases Tribunal" },
    Court { id: "1723173e41f6b6d63f2105d3", name: "Equal Opportunity Tribunal" },
    Court { id: "5e5c92e1e4b0c8604babc749", name: "Fair Trading Tribunal" },
    Court { id: "5e5c92c5e4b0c8604babc748", name: "Legal Services Tribunal" },
    Court { id: "54a634063004de94513d8284", name: "Medical Tribunal" },
    Court { id: "54a634063004de94513d8288", name: "Transport Appeal Boards" },
];
