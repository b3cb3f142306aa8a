//! Order index maintenance
//!
//! Computes the order writes that keep every group of a collection
//! numbered `0..n` after a drag-and-drop move. The algorithm is generic
//! over the grouping key: task columns use [`TaskStatus`], folders use
//! `()` since they share a single global sequence.
//!
//! Every function here is pure. Callers read a fresh snapshot, plan the
//! move, and write the returned assignments as one batch.
//!
//! [`TaskStatus`]: crate::database::TaskStatus

use serde::Serialize;

/// Position of one entity in a snapshot, or a new position to write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement<G> {
    pub id: String,
    pub group: G,
    pub order: i64,
}

impl<G> Placement<G> {
    pub fn new(id: impl Into<String>, group: G, order: i64) -> Self {
        Self {
            id: id.into(),
            group,
            order,
        }
    }
}

/// What the entity was dropped onto
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget<G> {
    /// The group container itself (empty column or empty space)
    Group(G),
    /// Another entity, possibly in a different group
    Item(String),
}

/// A drag-and-drop move reported by the interaction layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveIntent<G> {
    pub item: String,
    pub target: DropTarget<G>,
}

impl<G> MoveIntent<G> {
    pub fn onto_group(item: impl Into<String>, group: G) -> Self {
        Self {
            item: item.into(),
            target: DropTarget::Group(group),
        }
    }

    pub fn onto_item(item: impl Into<String>, over: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            target: DropTarget::Item(over.into()),
        }
    }
}

/// Plan the writes for a move against `snapshot`.
///
/// Returns only the placements whose group or order actually changes,
/// target group first, each group in index order. An empty result means
/// nothing to write: the move is a no-op, or the moved or dropped-on
/// entity is missing from the snapshot.
pub fn plan_move<G: Copy + Eq>(snapshot: &[Placement<G>], intent: &MoveIntent<G>) -> Vec<Placement<G>> {
    let Some(moved) = snapshot.iter().find(|p| p.id == intent.item) else {
        return Vec::new();
    };
    let source = moved.group;

    let (target, over) = match &intent.target {
        DropTarget::Group(group) => {
            if *group == source {
                return Vec::new();
            }
            (*group, None)
        }
        DropTarget::Item(over_id) => {
            if *over_id == moved.id {
                return Vec::new();
            }
            match snapshot.iter().find(|p| p.id == *over_id) {
                Some(over) => (over.group, Some(over.id.as_str())),
                None => return Vec::new(),
            }
        }
    };

    let mut target_seq = sequence(snapshot, target);

    if target == source {
        // Only reachable with an item target; a same-group container drop returned above.
        let (Some(old_index), Some(new_index)) = (
            index_of(&target_seq, &moved.id),
            over.and_then(|id| index_of(&target_seq, id)),
        ) else {
            return Vec::new();
        };
        if old_index == new_index {
            return Vec::new();
        }

        let entry = target_seq.remove(old_index);
        target_seq.insert(new_index, entry);
        return reindex(&target_seq, target);
    }

    let mut source_seq = sequence(snapshot, source);
    source_seq.retain(|p| p.id != moved.id);

    let insert_at = over
        .and_then(|id| index_of(&target_seq, id))
        .unwrap_or(target_seq.len());
    target_seq.insert(insert_at, moved);

    let mut writes = reindex(&target_seq, target);
    writes.extend(reindex(&source_seq, source));
    writes
}

/// Renumber one group of `snapshot` to `0..n`, keeping relative order.
///
/// Used after a member leaves the group without a move (deletion).
pub fn compact<G: Copy + Eq>(snapshot: &[Placement<G>], group: G) -> Vec<Placement<G>> {
    reindex(&sequence(snapshot, group), group)
}

/// Order value for an entity appended to the end of `group`.
pub fn next_order<G: Copy + Eq>(snapshot: &[Placement<G>], group: G) -> i64 {
    snapshot
        .iter()
        .filter(|p| p.group == group)
        .map(|p| p.order + 1)
        .max()
        .unwrap_or(0)
}

/// Members of `group` sorted by order. Ties keep snapshot order.
fn sequence<G: Copy + Eq>(snapshot: &[Placement<G>], group: G) -> Vec<&Placement<G>> {
    let mut members: Vec<&Placement<G>> = snapshot.iter().filter(|p| p.group == group).collect();
    members.sort_by_key(|p| p.order);
    members
}

fn index_of<G>(seq: &[&Placement<G>], id: &str) -> Option<usize> {
    seq.iter().position(|p| p.id == id)
}

/// Assign `order = index` within `group`, keeping only real changes.
fn reindex<G: Copy + Eq>(seq: &[&Placement<G>], group: G) -> Vec<Placement<G>> {
    seq.iter()
        .enumerate()
        .filter(|(index, p)| p.group != group || p.order != *index as i64)
        .map(|(index, p)| Placement::new(p.id.clone(), group, index as i64))
        .collect()
}
