#![cfg(feature = "quickcheck")]

use bst::{Cursor, Tree};
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

/// A key that is present in the tree it is generated alongside, chosen by position.
#[derive(Clone, Debug)]
struct Nth(usize);

impl Arbitrary for Nth {
    fn arbitrary(gen: &mut Gen) -> Self { Nth(usize::arbitrary(gen)) }
    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> { Box::new(self.0.shrink().map(Nth)) }
}

impl Nth {
    fn key<V>(&self, tree: &Tree<u32, V>) -> Option<u32> {
        if tree.is_empty() { return None; }
        tree.iter().nth(self.0 % tree.len()).map(|e| *e.0)
    }
}

fn keys<V>(tree: &Tree<u32, V>) -> Vec<u32> { tree.iter().map(|e| *e.0).collect() }

/// Lists every key along with its parent's key, in pre-order.
fn shape<V>(tree: &Tree<u32, V>) -> Vec<(u32, Option<u32>)> {
    fn walk<V>(cursor: Cursor<u32, V>, out: &mut Vec<(u32, Option<u32>)>) {
        if let Some(&key) = cursor.key() {
            out.push((key, cursor.parent().key().cloned()));
            walk(cursor.left(), out);
            walk(cursor.right(), out);
        }
    }

    let mut out = vec![];
    walk(tree.root(), &mut out);
    out
}

fn bits(n: usize) -> usize { (usize::BITS - n.leading_zeros()) as usize }

mod insert {
    use super::{keys, shape};
    use bst::Tree;
    use quickcheck::quickcheck;

    #[test]
    fn keeps_keys_sorted() {
        fn test(tree: Tree<u32, u16>) -> bool {
            keys(&tree).windows(2).all(|w| w[0] < w[1])
        }

        quickcheck(test as fn(Tree<u32, u16>) -> bool);
    }

    #[test]
    fn sets_len() {
        fn test(mut tree: Tree<u32, u16>, key: u32, value: u16) -> bool {
            let old_len = tree.len();
            let present = tree.contains_key(&key);
            let created = tree.insert(key, value).1;

            created != present && tree.len() == if created { old_len + 1 } else { old_len }
        }

        quickcheck(test as fn(Tree<u32, u16>, u32, u16) -> bool);
    }

    #[test]
    fn ignores_duplicates() {
        fn test(mut tree: Tree<u32, u16>, key: u32, value: u16) -> bool {
            let old_value = tree.get(&key).cloned();
            let old_shape = shape(&tree);
            let (cursor, created) = tree.insert(key, value);
            let found = cursor.value().cloned();

            match old_value {
                None => created && found == Some(value),
                Some(old) => !created && found == Some(old) && shape(&tree) == old_shape,
            }
        }

        quickcheck(test as fn(Tree<u32, u16>, u32, u16) -> bool);
    }

    #[test]
    fn find_round_trip() {
        fn test(mut tree: Tree<u32, u16>, key: u32, value: u16) -> bool {
            tree.erase(&key).ok();
            tree.insert(key, value);
            tree.find(&key).key_value() == Some((&key, &value))
        }

        quickcheck(test as fn(Tree<u32, u16>, u32, u16) -> bool);
    }
}

mod erase {
    use super::{keys, Nth};
    use bst::{Error, Tree};
    use quickcheck::{quickcheck, TestResult};

    #[test]
    fn removes_key() {
        fn test(mut tree: Tree<u32, u16>, nth: Nth) -> TestResult {
            let key = match nth.key(&tree) {
                None => return TestResult::discard(),
                Some(key) => key,
            };

            let value = tree.get(&key).cloned();
            let erased = tree.erase(&key);

            TestResult::from_bool(
                erased.map(|e| e.1).ok() == value &&
                tree.find(&key).is_end() &&
                !tree.contains_key(&key)
            )
        }

        quickcheck(test as fn(Tree<u32, u16>, Nth) -> TestResult);
    }

    #[test]
    fn affects_no_others() {
        fn test(mut tree: Tree<u32, u16>, nth: Nth) -> TestResult {
            let key = match nth.key(&tree) {
                None => return TestResult::discard(),
                Some(key) => key,
            };

            let expected: Vec<u32> = keys(&tree).into_iter().filter(|&k| k != key).collect();
            tree.erase(&key).ok();

            TestResult::from_bool(keys(&tree) == expected && tree.len() == expected.len())
        }

        quickcheck(test as fn(Tree<u32, u16>, Nth) -> TestResult);
    }

    #[test]
    fn missing_key_is_reported() {
        fn test(mut tree: Tree<u32, u16>, key: u32) -> TestResult {
            if tree.contains_key(&key) { return TestResult::discard(); }

            let old_tree = tree.clone();
            TestResult::from_bool(tree.erase(&key) == Err(Error::KeyNotFound) && tree == old_tree)
        }

        quickcheck(test as fn(Tree<u32, u16>, u32) -> TestResult);
    }

    #[test]
    fn drains_to_empty() {
        fn test(mut tree: Tree<u32, u16>, order: Vec<usize>) -> bool {
            let mut order = order.into_iter().cycle();

            while !tree.is_empty() {
                let i = order.next().unwrap_or(0) % tree.len();
                let key = *tree.iter().nth(i).unwrap().0;
                if tree.erase(&key).is_err() { return false; }
            }

            tree.begin().is_end() && tree.height() == 0
        }

        quickcheck(test as fn(Tree<u32, u16>, Vec<usize>) -> bool);
    }
}

mod balance {
    use super::{bits, shape};
    use bst::Tree;
    use quickcheck::quickcheck;

    #[test]
    fn preserves_entries() {
        fn test(mut tree: Tree<u32, u16>) -> bool {
            let old_tree = tree.clone();
            tree.balance();
            tree == old_tree
        }

        quickcheck(test as fn(Tree<u32, u16>) -> bool);
    }

    #[test]
    fn minimizes_height() {
        fn test(mut tree: Tree<u32, u16>) -> bool {
            tree.balance();
            tree.height() == bits(tree.len())
        }

        quickcheck(test as fn(Tree<u32, u16>) -> bool);
    }

    #[test]
    fn is_idempotent() {
        fn test(mut tree: Tree<u32, u16>) -> bool {
            tree.balance();
            let once = shape(&tree);
            tree.balance();
            shape(&tree) == once
        }

        quickcheck(test as fn(Tree<u32, u16>) -> bool);
    }
}

#[quickcheck]
fn copy_has_same_shape(tree: Tree<u32, u16>) -> bool {
    let copy = tree.clone();
    shape(&copy) == shape(&tree) && copy == tree
}

#[quickcheck]
fn copy_is_independent(tree: Tree<u32, u16>, nth: Nth, key: u32) -> bool {
    let old_shape = shape(&tree);
    let mut copy = tree.clone();

    if let Some(victim) = nth.key(&copy) { copy.erase(&victim).ok(); }
    copy.insert(key, 0);
    copy.balance();

    shape(&tree) == old_shape
}

#[quickcheck]
fn take_empties_source(mut tree: Tree<u32, u16>, key: u32) -> bool {
    let old_keys = keys(&tree);
    let moved = tree.take();

    let source_empty = tree.is_empty() && tree.len() == 0 && tree.iter().next().is_none();
    tree.insert(key, 1);

    source_empty && keys(&moved) == old_keys && shape(&tree) == [(key, None)]
}

#[quickcheck]
fn cursor_matches_iter(tree: Tree<u32, u16>) -> bool {
    let mut cursor = tree.begin();
    let mut stepped = vec![];

    while let Some(key) = cursor.key() {
        stepped.push(*key);
        cursor.move_next();
    }

    stepped == keys(&tree) && cursor == tree.end()
}

#[test]
fn iter_is_double_ended() {
    fn test(tree: Tree<u32, u16>) -> bool {
        let mut forward = keys(&tree);
        forward.reverse();
        tree.iter().rev().map(|e| *e.0).collect::<Vec<_>>() == forward
    }

    quickcheck::quickcheck(test as fn(Tree<u32, u16>) -> bool);
}

#[test]
fn access_inserts_default() {
    fn test(mut tree: Tree<u32, u16>, key: u32) -> TestResult {
        let old = tree.get(&key).cloned();
        let old_len = tree.len();
        let value = *tree.access(key);

        TestResult::from_bool(match old {
            Some(old) => value == old && tree.len() == old_len,
            None => value == 0 && tree.len() == old_len + 1,
        })
    }

    quickcheck::quickcheck(test as fn(Tree<u32, u16>, u32) -> TestResult);
}
