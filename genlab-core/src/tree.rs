//! Lazy rose trees holding a generated value and its shrinks.

use std::fmt;
use std::iter;
use std::rc::Rc;

type Children<T> = Rc<dyn Fn() -> Vec<Tree<T>>>;

/// A generated value together with the ways it can be made smaller.
///
/// Children are produced on demand, so integer and list trees can describe
/// the whole shrink space without materialising it. The first child is
/// always the most aggressive shrink.
pub struct Tree<T> {
    pub value: T,
    children: Children<T>,
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Tree {
            value: self.value.clone(),
            children: Rc::clone(&self.children),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Tree<T> {
    /// A tree with no shrinks.
    pub fn singleton(value: T) -> Self {
        Tree {
            value,
            children: Rc::new(Vec::new),
        }
    }

    /// A tree whose children are computed by `children` each time they are
    /// requested.
    pub fn new<F>(value: T, children: F) -> Self
    where
        F: Fn() -> Vec<Tree<T>> + 'static,
    {
        Tree {
            value,
            children: Rc::new(children),
        }
    }

    pub fn with_children(value: T, children: Vec<Tree<T>>) -> Self
    where
        T: Clone,
    {
        Tree::new(value, move || children.clone())
    }

    /// Build a tree by repeatedly applying `shrink` to each value.
    pub fn unfold<F>(value: T, shrink: F) -> Self
    where
        T: Clone,
        F: Fn(&T) -> Vec<T> + 'static,
    {
        Self::unfold_shared(value, Rc::new(shrink))
    }

    fn unfold_shared(value: T, shrink: Rc<dyn Fn(&T) -> Vec<T>>) -> Self
    where
        T: Clone,
    {
        let current = value.clone();
        Tree::new(value, move || {
            shrink(&current)
                .into_iter()
                .map(|next| Tree::unfold_shared(next, Rc::clone(&shrink)))
                .collect()
        })
    }

    pub fn children(&self) -> Vec<Tree<T>> {
        (self.children)()
    }

    pub fn has_shrinks(&self) -> bool {
        !self.children().is_empty()
    }

    pub fn map<U, F>(self, f: F) -> Tree<U>
    where
        F: Fn(T) -> U + Clone + 'static,
        U: 'static,
    {
        let Tree { value, children } = self;
        let value = f(value);
        Tree::new(value, move || {
            children()
                .into_iter()
                .map(|child| child.map(f.clone()))
                .collect()
        })
    }

    /// Monadic bind: shrinks of the outer value come first, each rebuilt
    /// through `f`, followed by the shrinks of the bound value.
    pub fn bind<U, F>(self, f: F) -> Tree<U>
    where
        F: Fn(T) -> Tree<U> + Clone + 'static,
        U: 'static,
    {
        let Tree {
            value,
            children: outer,
        } = self;
        let Tree {
            value: bound,
            children: inner,
        } = f(value);

        Tree::new(bound, move || {
            let mut result: Vec<Tree<U>> = outer()
                .into_iter()
                .map(|child| child.bind(f.clone()))
                .collect();
            result.extend(inner());
            result
        })
    }

    /// Pair two trees; the left component shrinks first.
    pub fn zip<U>(self, other: Tree<U>) -> Tree<(T, U)>
    where
        T: Clone,
        U: Clone + 'static,
    {
        let value = (self.value.clone(), other.value.clone());
        Tree::new(value, move || {
            let mut result: Vec<Tree<(T, U)>> = self
                .children()
                .into_iter()
                .map(|left| left.zip(other.clone()))
                .collect();
            result.extend(
                other
                    .children()
                    .into_iter()
                    .map(|right| self.clone().zip(right)),
            );
            result
        })
    }

    /// Combine element trees into a list tree.
    ///
    /// Shrinks first drop contiguous chunks (whole list, halves, quarters,
    /// down to single elements) as long as `min_len` elements remain, then
    /// shrink elements in place.
    pub fn interleave(trees: Vec<Tree<T>>, min_len: usize) -> Tree<Vec<T>>
    where
        T: Clone,
    {
        let value = trees.iter().map(|tree| tree.value.clone()).collect();
        let trees = Rc::new(trees);

        Tree::new(value, move || {
            let len = trees.len();
            let mut result = Vec::new();

            for chunk in halves(len) {
                for start in (0..len).step_by(chunk) {
                    let end = (start + chunk).min(len);
                    if len - (end - start) < min_len {
                        continue;
                    }
                    let kept: Vec<Tree<T>> = trees[..start]
                        .iter()
                        .chain(&trees[end..])
                        .cloned()
                        .collect();
                    result.push(Tree::interleave(kept, min_len));
                }
            }

            for (index, tree) in trees.iter().enumerate() {
                for shrunk in tree.children() {
                    let mut next = Vec::clone(&trees);
                    next[index] = shrunk;
                    result.push(Tree::interleave(next, min_len));
                }
            }

            result
        })
    }
}

impl<T: 'static> From<T> for Tree<T> {
    fn from(value: T) -> Self {
        Tree::singleton(value)
    }
}

/// `n, n/2, n/4, ..., 1`.
fn halves(n: usize) -> impl Iterator<Item = usize> {
    iter::successors(Some(n), |&k| Some(k / 2)).take_while(|&k| k > 0)
}
