use serde::{Deserialize, Serialize};

/// Colours handed out to groups that do not bring their own.
pub const GROUP_PALETTE: [&str; 12] = [
    "#e6194b", "#3cb44b", "#4363d8", "#f58231", "#911eb4", "#46f0f0", "#f032e6", "#bcf60c",
    "#008080", "#9a6324", "#800000", "#000075",
];

pub fn palette_color(group_idx: usize) -> &'static str {
    GROUP_PALETTE[group_idx % GROUP_PALETTE.len()]
}

/// Binds the first `nb` members of a group to a named constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConstraint {
    #[serde(alias = "constraint")]
    pub name: String,
    pub nb: usize,
}

/// One person of a group. Immutable once the group is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub group_name: String,
    pub group_color: String,
    #[serde(rename = "groupNb")]
    pub group_size: usize,
    #[serde(rename = "nb")]
    pub index: usize,
    pub constraint: Option<String>,
}

/// Compact handle to a member: group position in the problem + index in the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberRef {
    pub group: usize,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub name: String,
    pub color: String,
    pub constraint: Option<GroupConstraint>,
    pub members: Vec<Member>,
}

impl Group {
    /// Expands a group into `size` members. The first
    /// `constraint.nb` members (by index) carry the constraint name.
    pub fn new(
        name: impl Into<String>,
        size: usize,
        color: impl Into<String>,
        constraint: Option<GroupConstraint>,
    ) -> Self {
        let name = name.into();
        let color = color.into();

        let members = (0..size)
            .map(|i| Member {
                group_name: name.clone(),
                group_color: color.clone(),
                group_size: size,
                index: i,
                constraint: constraint
                    .as_ref()
                    .filter(|c| c.nb > i)
                    .map(|c| c.name.clone()),
            })
            .collect();

        Self {
            name,
            color,
            constraint,
            members,
        }
    }

    #[inline(always)]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn member(&self, i: usize) -> Option<&Member> {
        self.members.get(i)
    }
}
