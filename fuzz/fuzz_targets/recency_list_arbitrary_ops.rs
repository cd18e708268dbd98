#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::RecencyList;

// Fuzz arbitrary operation sequences on RecencyList
//
// Covers push_back, pop_front, move_to_back, remove, get and clear, including
// stale SlotIds left over from removed nodes.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u32> = RecencyList::new();
    let mut all_ids = Vec::new();

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 6;
        let value = u32::from(chunk[1]);

        match op {
            0 => {
                let id = list.push_back(value);
                all_ids.push(id);
                assert_eq!(list.back(), Some(&value));
                assert_eq!(list.get(id), Some(&value));
            },
            1 => {
                let old_len = list.len();
                match list.pop_front() {
                    Some(_) => assert_eq!(list.len(), old_len - 1),
                    None => assert_eq!(old_len, 0),
                }
            },
            2 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    if list.move_to_back(id) {
                        assert_eq!(list.back_id(), Some(id));
                    } else {
                        assert!(!list.contains(id));
                    }
                }
            },
            3 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    let was_live = list.contains(id);
                    assert_eq!(list.remove(id).is_some(), was_live);
                    assert!(!list.contains(id));
                }
            },
            4 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    assert_eq!(list.get(id).is_some(), list.contains(id));
                }
            },
            _ => {
                list.clear();
                all_ids.clear();
                assert!(list.is_empty());
            },
        }

        assert_eq!(list.iter().count(), list.len());
        list.check_invariants().unwrap();
    }
});
