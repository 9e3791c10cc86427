use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn split_descriptors(out: &str, base: &str) -> Vec<String> {
    let rest = out
        .strip_prefix(base)
        .unwrap_or_else(|| panic!("'{out}' does not start with '{base}'"));
    let rest = rest.strip_prefix(", ").expect("descriptor separator");
    rest.split(", ").map(str::to_string).collect()
}

#[test]
fn keeps_normalized_prompt_and_appends_four_descriptors() {
    let mut rng = StdRng::seed_from_u64(7);
    for kind in [PromptKind::Image, PromptKind::Video] {
        for _ in 0..50 {
            let out = enhance("  a   red\tfox \n in snow ", kind, &mut rng);
            let descs = split_descriptors(&out, "a red fox in snow");
            assert_eq!(descs.len(), DESCRIPTOR_COUNT);
            for d in &descs {
                assert!(kind.descriptors().contains(&d.as_str()), "unknown descriptor {d}");
            }
            let mut uniq = descs.clone();
            uniq.sort();
            uniq.dedup();
            assert_eq!(uniq.len(), DESCRIPTOR_COUNT, "descriptors repeat: {descs:?}");
        }
    }
}

#[test]
fn empty_prompt_falls_back_to_default_description() {
    let mut rng = StdRng::seed_from_u64(1);
    let out = enhance(" \t ", PromptKind::Video, &mut rng);
    let descs = split_descriptors(&out, PromptKind::Video.default_description());
    assert_eq!(descs.len(), DESCRIPTOR_COUNT);
}

#[test]
fn same_seed_same_output() {
    let a = enhance("harbor", PromptKind::Image, &mut StdRng::seed_from_u64(42));
    let b = enhance("harbor", PromptKind::Image, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn vocabularies_are_comma_free_and_large_enough() {
    for kind in [PromptKind::Image, PromptKind::Video] {
        assert!(kind.descriptors().len() >= DESCRIPTOR_COUNT);
        assert!(kind.descriptors().iter().all(|d| !d.contains(',')));
    }
}

#[test]
fn normalize_collapses_runs() {
    assert_eq!(normalize_whitespace("  a \n\n b\tc  "), "a b c");
    assert_eq!(normalize_whitespace("   "), "");
}
