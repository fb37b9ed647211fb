/*
 * pando is a decentralized, content-addressed version-control core
 * Copyright (C) 2026  Javier Lancha Vázquez <javier.lancha@gmail.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
*/

//! Snapshot DAG traversal: parent chains, ancestor sets, and lowest common
//! ancestor discovery for the merge engine's three-way base.

use std::collections::{HashSet, VecDeque};

use crate::error::Result;
use crate::global::Cid;
use crate::store::ObjectStore;

/// The direct parents of a snapshot, via the codec.
pub fn parents(store: &dyn ObjectStore, cid: &Cid) -> Result<Vec<Cid>> {
    let snapshot = store.get_node(cid)?;
    Ok(snapshot
        .as_snapshot()
        .map(|s| s.parents.clone())
        .unwrap_or_default())
}

/// All ancestors of `cid`, deduplicated, via breadth-first traversal over
/// `parents`. The DAG is finite so this always terminates.
pub fn ancestors(store: &dyn ObjectStore, cid: &Cid) -> Result<Vec<Cid>> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    let mut order = Vec::new();

    for p in parents(store, cid)? {
        if seen.insert(p.clone()) {
            queue.push_back(p);
        }
    }

    while let Some(current) = queue.pop_front() {
        order.push(current.clone());
        for p in parents(store, &current)? {
            if seen.insert(p.clone()) {
                queue.push_back(p);
            }
        }
    }

    Ok(order)
}

/// BFS ancestor discovery in visitation order, including `cid` itself as
/// the first element — used internally by `lca` to find the first shared
/// node without materializing the full ancestor set twice.
fn ancestors_including_self(store: &dyn ObjectStore, cid: &Cid) -> Result<Vec<Cid>> {
    let mut order = vec![cid.clone()];
    order.extend(ancestors(store, cid)?);
    Ok(order)
}

/// Lowest common ancestor of `a` and `b`. Returns `None` if they share no
/// common ancestor (treated by the merge engine as the empty tree).
///
/// Candidates are found by walking `b`'s ancestors (including `b` itself)
/// in BFS order and taking the first one that also appears in `a`'s
/// ancestor set. In criss-cross histories with several minimal common
/// ancestors, any one of them is acceptable as long as it is not itself an
/// ancestor of a different candidate — which BFS-first-hit already
/// guarantees, since a *later* common ancestor in `b`'s BFS order is, by
/// construction, reachable only through earlier ones.
pub fn lca(store: &dyn ObjectStore, a: &Cid, b: &Cid) -> Result<Option<Cid>> {
    if a == b {
        return Ok(Some(a.clone()));
    }

    let a_ancestors: HashSet<Cid> = ancestors_including_self(store, a)?.into_iter().collect();

    for candidate in ancestors_including_self(store, b)? {
        if a_ancestors.contains(&candidate) {
            return Ok(Some(candidate));
        }
    }

    Ok(None)
}
