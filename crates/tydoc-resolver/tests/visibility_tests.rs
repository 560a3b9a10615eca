use super::*;

fn first_party(name: &'static str) -> SymbolMeta<'static> {
    SymbolMeta {
        name,
        is_vendored: false,
        file_path: "src/types.ts",
    }
}

fn vendored(name: &'static str) -> SymbolMeta<'static> {
    SymbolMeta {
        name,
        is_vendored: true,
        file_path: "node_modules/pkg/index.d.ts",
    }
}

#[test]
fn default_inlines_first_party() {
    assert_eq!(decide(&first_party("Props"), None), Expansion::Inline);
}

#[test]
fn default_collapses_vendored() {
    assert_eq!(decide(&vendored("Moment"), None), Expansion::Reference);
}

#[test]
fn predicate_true_forces_inline_for_vendored() {
    let allow: Box<FilterPredicate> = Box::new(|meta| meta.name == "Moment");
    assert_eq!(
        decide(&vendored("Moment"), Some(&*allow)),
        Expansion::Inline
    );
    assert_eq!(
        decide(&vendored("Duration"), Some(&*allow)),
        Expansion::Reference
    );
}

#[test]
fn predicate_false_forces_reference_for_first_party() {
    let deny_all: Box<FilterPredicate> = Box::new(|_| false);
    assert_eq!(
        decide(&first_party("Props"), Some(&*deny_all)),
        Expansion::Reference
    );
}

#[test]
fn predicate_sees_file_path() {
    let by_file: Box<FilterPredicate> =
        Box::new(|meta| !meta.file_path.starts_with("node_modules/"));
    assert_eq!(
        decide(&first_party("Props"), Some(&*by_file)),
        Expansion::Inline
    );
    assert_eq!(
        decide(&vendored("Moment"), Some(&*by_file)),
        Expansion::Reference
    );
}
