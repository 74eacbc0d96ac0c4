#![allow(missing_docs)]
use crate::{Cursor, Exhausted, HashDictionary, KeyNotFound};
use rand::prelude::*;
use rand_pcg::Pcg64;
use std::collections::HashMap;

fn contents(dut: &HashDictionary<u16, u32>) -> Vec<(u16, u32)> {
    let mut via_visitor = Vec::new();
    dut.for_each(|&key, &value| {
        via_visitor.push((key, value));
        true
    });
    via_visitor.sort_unstable();

    let mut via_cursor = Vec::new();
    let mut cursor = dut.cursor();
    while let Ok((&key, &value)) = cursor.current() {
        via_cursor.push((key, value));
        cursor.advance().unwrap();
    }
    via_cursor.sort_unstable();

    // Internal and external iteration must agree on the entry set.
    assert_eq!(via_visitor, via_cursor);
    assert_eq!(via_visitor.len(), dut.len());
    via_visitor
}

fn check_against(dut: &HashDictionary<u16, u32>, reference: &HashMap<u16, u32>) {
    let mut expected: Vec<(u16, u32)> = reference.iter().map(|(&k, &v)| (k, v)).collect();
    expected.sort_unstable();
    assert_eq!(contents(dut), expected);
}

#[test]
fn empty_dictionary() {
    let dictionary = HashDictionary::<u32, u32>::new();
    assert_eq!(dictionary.len(), 0);
    assert!(dictionary.is_empty());
    assert!(!dictionary.contains(&0));
    assert!(!dictionary.contains(&17));
    assert_eq!(dictionary.get(&17), Err(KeyNotFound));

    let mut cursor = dictionary.cursor();
    assert!(!cursor.has_next());
    assert_eq!(cursor.current(), Err(Exhausted));
    assert_eq!(cursor.advance(), Err(Exhausted));
}

#[test]
fn remove_on_empty_fails() {
    let mut dictionary = HashDictionary::<u32, u32>::new();
    assert_eq!(dictionary.remove(&1), Err(KeyNotFound));
}

#[test]
fn last_insert_wins() {
    let mut dictionary = HashDictionary::new();
    dictionary.insert("key", 1);
    dictionary.insert("key", 2);
    dictionary.insert("other", 10);
    dictionary.insert("key", 3);
    assert_eq!(dictionary.len(), 2);
    assert_eq!(dictionary.get(&"key"), Ok(&3));
    assert_eq!(dictionary.get(&"other"), Ok(&10));
}

#[test]
fn string_keys() {
    let mut dictionary = HashDictionary::new();
    dictionary.insert("Gato".to_owned(), "miau".to_owned());
    dictionary.insert("Perro".to_owned(), "guau".to_owned());
    dictionary.insert("Vaca".to_owned(), "moo".to_owned());
    assert_eq!(dictionary.len(), 3);
    assert_eq!(dictionary.get(&"Perro".to_owned()), Ok(&"guau".to_owned()));
    assert_eq!(dictionary.remove(&"Gato".to_owned()), Ok("miau".to_owned()));
    assert!(!dictionary.contains(&"Gato".to_owned()));
    assert_eq!(dictionary.len(), 2);
}

#[test]
fn removed_key_stays_gone() {
    let mut dictionary = HashDictionary::new();
    dictionary.insert(1, 'a');
    dictionary.insert(2, 'b');
    assert_eq!(dictionary.remove(&1), Ok('a'));
    assert!(!dictionary.contains(&1));
    assert_eq!(dictionary.get(&1), Err(KeyNotFound));
    assert_eq!(dictionary.remove(&1), Err(KeyNotFound));
    assert_eq!(dictionary.len(), 1);
}

#[test]
fn ten_thousand_keys() {
    let mut dictionary = HashDictionary::new();
    for key in 0..10_000u32 {
        dictionary.insert(key, key);
    }
    assert_eq!(dictionary.len(), 10_000);
    for key in 0..10_000u32 {
        assert_eq!(dictionary.get(&key), Ok(&key));
    }

    for key in 0..10_000u32 {
        assert_eq!(dictionary.remove(&key), Ok(key));
    }
    assert_eq!(dictionary.len(), 0);
    assert!(!dictionary.contains(&0));
    assert!(!dictionary.cursor().has_next());
}

#[test]
fn grow_and_shrink_thresholds() {
    let mut dictionary = HashDictionary::new();
    assert_eq!(dictionary.capacity(), 13);

    // The table doubles when the load factor reaches 0.75: with 10 of 13
    // slots' worth of entries the 11th insertion grows it.
    for key in 0..10u32 {
        dictionary.insert(key, key);
    }
    assert_eq!(dictionary.capacity(), 13);
    dictionary.insert(10, 10);
    assert_eq!(dictionary.capacity(), 26);

    for key in 11..20u32 {
        dictionary.insert(key, key);
    }
    assert_eq!(dictionary.capacity(), 26);
    dictionary.insert(20, 20);
    assert_eq!(dictionary.capacity(), 52);

    // Every entry survives the rehashes.
    for key in 0..=20u32 {
        assert_eq!(dictionary.get(&key), Ok(&key));
    }

    // Halve once the load factor would drop to 0.25, with 13 as the floor.
    for key in 0..7u32 {
        assert_eq!(dictionary.remove(&key), Ok(key));
    }
    assert_eq!(dictionary.capacity(), 52);
    assert_eq!(dictionary.remove(&7), Ok(7));
    assert_eq!(dictionary.capacity(), 26);

    for key in 8..14u32 {
        assert_eq!(dictionary.remove(&key), Ok(key));
    }
    assert_eq!(dictionary.capacity(), 26);
    assert_eq!(dictionary.remove(&14), Ok(14));
    assert_eq!(dictionary.capacity(), 13);

    for key in 15..=20u32 {
        assert_eq!(dictionary.remove(&key), Ok(key));
    }
    assert_eq!(dictionary.capacity(), 13);
    assert!(dictionary.is_empty());
}

#[test]
fn visitor_stops_early() {
    let mut dictionary = HashDictionary::new();
    for key in 0..100u32 {
        dictionary.insert(key, ());
    }
    let mut visited = 0;
    dictionary.for_each(|_, _| {
        visited += 1;
        visited < 5
    });
    assert_eq!(visited, 5);
}

#[test]
fn cursor_steps_through_every_entry() {
    let mut dictionary = HashDictionary::new();
    for key in 0..50u16 {
        dictionary.insert(key, u32::from(key) * 2);
    }
    let mut seen = Vec::new();
    let mut cursor = dictionary.cursor();
    while cursor.has_next() {
        let (&key, &value) = cursor.current().unwrap();
        assert_eq!(value, u32::from(key) * 2);
        seen.push(key);
        cursor.advance().unwrap();
    }
    seen.sort_unstable();
    assert_eq!(seen, (0..50).collect::<Vec<_>>());
    assert_eq!(cursor.current(), Err(Exhausted));
    assert_eq!(cursor.advance(), Err(Exhausted));
}

#[test]
fn from_iterator_collects_entries() {
    let dictionary: HashDictionary<u32, u32> = (0..20).map(|k| (k, k + 100)).collect();
    assert_eq!(dictionary.len(), 20);
    assert_eq!(dictionary.get(&5), Ok(&105));
}

#[test]
fn randomized_against_std_hash_map() {
    for seed in 0..4 {
        let mut rng = Pcg64::seed_from_u64(seed);
        let mut dut = HashDictionary::new();
        let mut reference: HashMap<u16, u32> = HashMap::new();
        for step in 0..5_000 {
            // A small key space keeps chains populated and drives the table
            // across its resize thresholds in both directions.
            let key = rng.gen_range(0..400u16);
            match rng.gen_range(0..10) {
                0..=4 => {
                    let value = rng.gen();
                    dut.insert(key, value);
                    reference.insert(key, value);
                }
                5..=7 => {
                    assert_eq!(dut.remove(&key).ok(), reference.remove(&key));
                }
                _ => {
                    assert_eq!(dut.get(&key).ok(), reference.get(&key));
                    assert_eq!(dut.contains(&key), reference.contains_key(&key));
                }
            }
            assert_eq!(dut.len(), reference.len());
            if step % 1_000 == 0 {
                check_against(&dut, &reference);
            }
        }
        check_against(&dut, &reference);
    }
}
