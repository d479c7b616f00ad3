//! Owned singly-linked cells shared by the node and edge lists.
//!
//! Every helper here walks the chain in a loop, so the stack use does not
//! grow with the length of a list.

/// Owning pointer to the first cell of a chain, `None` at the end.
pub(crate) type Link<C> = Option<Box<C>>;

/// A cell that owns its successor.
pub(crate) trait Linked: Sized {
    fn next_mut(&mut self) -> &mut Link<Self>;
}

/// Detaches the leading cells for which `precedes` holds.
///
/// Returns those cells in reverse order together with the remainder of the
/// chain. [`rejoin`] puts them back in front.
pub(crate) fn split_while<C, F>(mut rest: Link<C>, precedes: F) -> (Link<C>, Link<C>)
where
    C: Linked,
    F: Fn(&C) -> bool,
{
    let mut prefix = None;

    while let Some(mut cell) = rest {
        if !precedes(&cell) {
            rest = Some(cell);
            break;
        }

        rest = cell.next_mut().take();
        *cell.next_mut() = prefix;
        prefix = Some(cell);
    }

    (prefix, rest)
}

/// Moves the cells of a reversed chain in front of `rest`, one at a time.
pub(crate) fn rejoin<C: Linked>(mut reversed: Link<C>, mut rest: Link<C>) -> Link<C> {
    while let Some(mut cell) = reversed {
        reversed = cell.next_mut().take();
        *cell.next_mut() = rest;
        rest = Some(cell);
    }

    rest
}

/// Drops a chain one cell at a time.
pub(crate) fn dismantle<C: Linked>(mut link: Link<C>) {
    while let Some(mut cell) = link {
        link = cell.next_mut().take();
    }
}
