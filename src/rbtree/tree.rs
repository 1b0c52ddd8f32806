use std::cmp::Ordering;
use compare::Compare;
use arena::TypedArena;
use rbtree::node::{Color, Node};

pub type Nodes<T> = TypedArena<Node<T>>;
pub type Link = Option<usize>;

// Child assignment is the only way to attach a node: a present child always
// gets its parent and side flag updated in the same breath, and clearing a
// slot leaves the former child untouched.
pub fn set_left<T>(nodes: &mut Nodes<T>, parent: usize, child: Link) {
    nodes.get_mut(parent).left = child;
    if let Some(index) = child {
        let child_node = nodes.get_mut(index);
        child_node.parent = Some(parent);
        child_node.is_left = true;
    }
}

pub fn set_right<T>(nodes: &mut Nodes<T>, parent: usize, child: Link) {
    nodes.get_mut(parent).right = child;
    if let Some(index) = child {
        let child_node = nodes.get_mut(index);
        child_node.parent = Some(parent);
        child_node.is_left = false;
    }
}

fn make_root<T>(nodes: &mut Nodes<T>, root: &mut Link, link: Link) {
    *root = link;
    if let Some(index) = link {
        nodes.get_mut(index).parent = None;
    }
}

// Puts `child` into the slot `index` currently occupies, whichever side of
// whichever parent that is.
fn replace_in_parent<T>(nodes: &mut Nodes<T>, root: &mut Link, index: usize, child: Link) {
    match nodes.get(index).parent {
        None => make_root(nodes, root, child),
        Some(parent) => {
            if nodes.get(index).is_left {
                set_left(nodes, parent, child);
            } else {
                set_right(nodes, parent, child);
            }
        },
    }
}

pub fn rotate_left<T>(nodes: &mut Nodes<T>, root: &mut Link, index: usize) {
    let pivot = match nodes.get(index).right {
        Some(pivot) => pivot,
        None => return,
    };
    let inner = nodes.get(pivot).left;
    set_right(nodes, index, inner);
    replace_in_parent(nodes, root, index, Some(pivot));
    set_left(nodes, pivot, Some(index));
}

pub fn rotate_right<T>(nodes: &mut Nodes<T>, root: &mut Link, index: usize) {
    let pivot = match nodes.get(index).left {
        Some(pivot) => pivot,
        None => return,
    };
    let inner = nodes.get(pivot).right;
    set_left(nodes, index, inner);
    replace_in_parent(nodes, root, index, Some(pivot));
    set_right(nodes, pivot, Some(index));
}

pub fn find<T, C, Q>(nodes: &Nodes<T>, root: Link, entry: &Q, cmp: &C) -> Option<usize>
where
    C: Compare<Q, T>,
    Q: ?Sized,
{
    let mut current = root;
    while let Some(index) = current {
        current = match cmp.compare(entry, &nodes.get(index).entry) {
            Ordering::Less => nodes.get(index).left,
            Ordering::Greater => nodes.get(index).right,
            Ordering::Equal => return Some(index),
        };
    }
    None
}

pub fn insert<T, C>(nodes: &mut Nodes<T>, root: &mut Link, entry: T, cmp: &C)
where
    C: Compare<T>,
{
    let index = nodes.allocate(Node::new(entry));
    insert_node(nodes, root, index, cmp);
}

// Attaches a detached red node as a leaf and rebalances. Equal entries
// descend right, so duplicates keep their insertion order.
fn insert_node<T, C>(nodes: &mut Nodes<T>, root: &mut Link, index: usize, cmp: &C)
where
    C: Compare<T>,
{
    let mut current = match *root {
        Some(current) => current,
        None => {
            nodes.get_mut(index).color = Color::Black;
            make_root(nodes, root, Some(index));
            return;
        },
    };
    loop {
        let ordering = cmp.compare(&nodes.get(index).entry, &nodes.get(current).entry);
        if ordering == Ordering::Less {
            match nodes.get(current).left {
                Some(next) => current = next,
                None => {
                    set_left(nodes, current, Some(index));
                    break;
                },
            }
        } else {
            match nodes.get(current).right {
                Some(next) => current = next,
                None => {
                    set_right(nodes, current, Some(index));
                    break;
                },
            }
        }
    }
    fixup(nodes, root, index);
}

// Bottom-up restoration of the coloring rules after `index` was attached as
// a red leaf. Terminates at the root, at a black parent, or after one
// rotation group.
fn fixup<T>(nodes: &mut Nodes<T>, root: &mut Link, mut index: usize) {
    loop {
        let parent = match nodes.get(index).parent {
            Some(parent) => parent,
            None => {
                // the root is always black
                nodes.get_mut(index).color = Color::Black;
                return;
            },
        };
        if nodes.get(parent).color == Color::Black {
            return;
        }
        let grandparent = match nodes.get(parent).parent {
            Some(grandparent) => grandparent,
            None => {
                // a red root can only be left over from a splice
                nodes.get_mut(parent).color = Color::Black;
                return;
            },
        };
        let uncle = if nodes.get(parent).is_left {
            nodes.get(grandparent).right
        } else {
            nodes.get(grandparent).left
        };
        match uncle {
            Some(uncle) if nodes.get(uncle).color == Color::Red => {
                // red uncle: push the red conflict two levels up
                nodes.get_mut(parent).color = Color::Black;
                nodes.get_mut(uncle).color = Color::Black;
                nodes.get_mut(grandparent).color = Color::Red;
                index = grandparent;
            },
            _ => {
                // black uncle: one or two rotations settle the subtree
                match (nodes.get(parent).is_left, nodes.get(index).is_left) {
                    (true, true) => {
                        rotate_right(nodes, root, grandparent);
                        swap_colors(nodes, grandparent, parent);
                    },
                    (true, false) => {
                        rotate_left(nodes, root, parent);
                        rotate_right(nodes, root, grandparent);
                        swap_colors(nodes, grandparent, index);
                    },
                    (false, false) => {
                        rotate_left(nodes, root, grandparent);
                        swap_colors(nodes, grandparent, parent);
                    },
                    (false, true) => {
                        rotate_right(nodes, root, parent);
                        rotate_left(nodes, root, grandparent);
                        swap_colors(nodes, grandparent, index);
                    },
                }
                return;
            },
        }
    }
}

fn swap_colors<T>(nodes: &mut Nodes<T>, a: usize, b: usize) {
    let color = nodes.get(a).color;
    nodes.get_mut(a).color = nodes.get(b).color;
    nodes.get_mut(b).color = color;
}

/// Splices the first entry equal to `entry` out of the tree. The right
/// subtree takes the vacated slot and every entry of the detached left
/// subtree goes back through the insertion path, so no entry is lost, but
/// the coloring rules are not re-established across the splice.
pub fn remove<T, C, Q>(nodes: &mut Nodes<T>, root: &mut Link, entry: &Q, cmp: &C) -> Option<T>
where
    C: Compare<Q, T> + Compare<T>,
    Q: ?Sized,
{
    let index = match find(nodes, *root, entry, cmp) {
        Some(index) => index,
        None => return None,
    };
    let left = nodes.get(index).left;
    let right = nodes.get(index).right;
    if nodes.get(index).parent.is_none() && right.is_none() {
        // the left subtree keeps its shape when the root has no right child
        make_root(nodes, root, left);
    } else {
        replace_in_parent(nodes, root, index, right);
        if let Some(orphan) = left {
            nodes.get_mut(orphan).parent = None;
            reinsert(nodes, root, orphan, cmp);
        }
    }
    Some(nodes.free(index).entry)
}

// Feeds every node of a detached subtree back through the insertion path.
fn reinsert<T, C>(nodes: &mut Nodes<T>, root: &mut Link, subtree: usize, cmp: &C)
where
    C: Compare<T>,
{
    let mut indices = Vec::new();
    let mut stack = vec![subtree];
    while let Some(index) = stack.pop() {
        if let Some(left) = nodes.get(index).left {
            stack.push(left);
        }
        if let Some(right) = nodes.get(index).right {
            stack.push(right);
        }
        indices.push(index);
    }
    for index in indices {
        {
            let node = nodes.get_mut(index);
            node.color = Color::Red;
            node.parent = None;
            node.left = None;
            node.right = None;
            node.is_left = false;
        }
        insert_node(nodes, root, index, cmp);
    }
}

pub fn min<T>(nodes: &Nodes<T>, root: Link) -> Option<&T> {
    root.map(|mut index| {
        while let Some(left) = nodes.get(index).left {
            index = left;
        }
        &nodes.get(index).entry
    })
}

pub fn max<T>(nodes: &Nodes<T>, root: Link) -> Option<&T> {
    root.map(|mut index| {
        while let Some(right) = nodes.get(index).right {
            index = right;
        }
        &nodes.get(index).entry
    })
}

#[cfg(test)]
pub mod checks {
    use compare::Compare;
    use rbtree::node::Color;
    use super::{Link, Nodes};

    // In-order traversal is nondecreasing under the comparator.
    pub fn ordered<T, C>(nodes: &Nodes<T>, root: Link, cmp: &C) -> bool
    where
        C: Compare<T>,
    {
        let mut previous: Option<usize> = None;
        let mut stack = Vec::new();
        let mut current = root;
        loop {
            while let Some(index) = current {
                stack.push(index);
                current = nodes.get(index).left;
            }
            let index = match stack.pop() {
                Some(index) => index,
                None => return true,
            };
            if let Some(previous) = previous {
                if cmp.compares_gt(&nodes.get(previous).entry, &nodes.get(index).entry) {
                    return false;
                }
            }
            previous = Some(index);
            current = nodes.get(index).right;
        }
    }

    pub fn root_is_black<T>(nodes: &Nodes<T>, root: Link) -> bool {
        root.map_or(true, |index| nodes.get(index).color == Color::Black)
    }

    pub fn no_red_red<T>(nodes: &Nodes<T>, root: Link) -> bool {
        fn is_red<T>(nodes: &Nodes<T>, link: Link) -> bool {
            link.map_or(false, |index| nodes.get(index).color == Color::Red)
        }
        let mut stack: Vec<usize> = root.into_iter().collect();
        while let Some(index) = stack.pop() {
            let node = nodes.get(index);
            if node.color == Color::Red && (is_red(nodes, node.left) || is_red(nodes, node.right)) {
                return false;
            }
            stack.extend(node.left);
            stack.extend(node.right);
        }
        true
    }

    // Every path to an absent child passes the same number of black nodes.
    pub fn black_height<T>(nodes: &Nodes<T>, root: Link) -> Option<usize> {
        match root {
            None => Some(1),
            Some(index) => {
                let node = nodes.get(index);
                let left = black_height(nodes, node.left)?;
                let right = black_height(nodes, node.right)?;
                if left != right {
                    return None;
                }
                match node.color {
                    Color::Black => Some(left + 1),
                    Color::Red => Some(left),
                }
            },
        }
    }

    // Downward links, parent back-links, and side flags agree.
    pub fn links_consistent<T>(nodes: &Nodes<T>, root: Link) -> bool {
        if let Some(index) = root {
            if nodes.get(index).parent.is_some() {
                return false;
            }
        }
        let mut stack: Vec<usize> = root.into_iter().collect();
        while let Some(index) = stack.pop() {
            let (left, right) = {
                let node = nodes.get(index);
                (node.left, node.right)
            };
            for &(child, is_left) in [(left, true), (right, false)].iter() {
                if let Some(child) = child {
                    let child_node = nodes.get(child);
                    if child_node.parent != Some(index) || child_node.is_left != is_left {
                        return false;
                    }
                    stack.push(child);
                }
            }
        }
        true
    }
}
