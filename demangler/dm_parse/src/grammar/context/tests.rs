use pretty_assertions::assert_eq;

use dm_tree::NodeKind;

use crate::demangle_symbol;
use crate::test_support::{dump, dump_type, lines, production, top_kinds, tree};

#[test]
fn known_type_substitutions() {
    assert_eq!(
        dump_type("Sb"),
        lines(&[
            "kind=Type",
            "  kind=Structure",
            "    kind=Module, text=\"Swift\"",
            "    kind=Identifier, text=\"Bool\"",
        ])
    );
    assert_eq!(
        dump_type("Sq"),
        lines(&[
            "kind=Type",
            "  kind=Enum",
            "    kind=Module, text=\"Swift\"",
            "    kind=Identifier, text=\"Optional\"",
        ])
    );
}

#[test]
fn objc_and_clang_modules() {
    assert_eq!(
        dump_type("CSo8NSObject"),
        lines(&[
            "kind=Type",
            "  kind=Class",
            "    kind=Module, text=\"__ObjC\"",
            "    kind=Identifier, text=\"NSObject\"",
        ])
    );
    assert_eq!(
        dump_type("VSC4CGPt"),
        lines(&[
            "kind=Type",
            "  kind=Structure",
            "    kind=Module, text=\"__C\"",
            "    kind=Identifier, text=\"CGPt\"",
        ])
    );
}

#[test]
fn function_entity() {
    assert_eq!(
        dump("_TF3foo3barFT_T_"),
        lines(&[
            "kind=Global",
            "  kind=Function",
            "    kind=Module, text=\"foo\"",
            "    kind=Identifier, text=\"bar\"",
            "    kind=Type",
            "      kind=FunctionType",
            "        kind=ArgumentTuple",
            "          kind=Type",
            "            kind=Tuple",
            "        kind=ReturnType",
            "          kind=Type",
            "            kind=Tuple",
        ])
    );
}

#[test]
fn method_refers_back_to_its_class() {
    assert_eq!(
        dump("_TFC3foo3Bar3bazfS0_FT_T_"),
        lines(&[
            "kind=Global",
            "  kind=Function",
            "    kind=Class",
            "      kind=Module, text=\"foo\"",
            "      kind=Identifier, text=\"Bar\"",
            "    kind=Identifier, text=\"baz\"",
            "    kind=Type",
            "      kind=UncurriedFunctionType",
            "        kind=ArgumentTuple",
            "          kind=Type",
            "            kind=Class",
            "              kind=Module, text=\"foo\"",
            "              kind=Identifier, text=\"Bar\"",
            "        kind=ReturnType",
            "          kind=Type",
            "            kind=FunctionType",
            "              kind=ArgumentTuple",
            "                kind=Type",
            "                  kind=Tuple",
            "              kind=ReturnType",
            "                kind=Type",
            "                  kind=Tuple",
        ])
    );
}

#[test]
fn substitutions_share_nodes() {
    let tree = tree("_TFC3foo3Bar3bazfS0_FT_T_");
    let function = tree.children(tree.root())[0];
    let class = tree.children(function)[0];
    let ty = tree.children(function)[2];
    let uncurried = tree.children(ty)[0];
    let arguments = tree.children(uncurried)[0];
    let self_type = tree.children(arguments)[0];
    assert_eq!(tree.children(self_type)[0], class);
}

#[test]
fn module_substitution_in_context() {
    assert_eq!(
        top_kinds("_TF3foo3barFT_VS_3Baz"),
        vec![NodeKind::Function]
    );
}

#[test]
fn substitution_out_of_range() {
    assert!(demangle_symbol("_TF3foo3barFS1_T_").is_none());
}

#[test]
fn static_function() {
    assert_eq!(
        demangle_symbol("_TZF3foo3barFT_T_")
            .map(|tree| tree.spine()[..3].to_vec()),
        Some(vec![NodeKind::Global, NodeKind::Static, NodeKind::Function])
    );
}

#[test]
fn deallocator_has_no_type() {
    assert_eq!(
        dump("_TFC3foo3BarD"),
        lines(&[
            "kind=Global",
            "  kind=Deallocator",
            "    kind=Class",
            "      kind=Module, text=\"foo\"",
            "      kind=Identifier, text=\"Bar\"",
        ])
    );
}

#[test]
fn variable_getter() {
    assert_eq!(
        dump("_TF3foog1xSi"),
        lines(&[
            "kind=Global",
            "  kind=Getter",
            "    kind=Variable",
            "      kind=Module, text=\"foo\"",
            "      kind=Identifier, text=\"x\"",
            "      kind=Type",
            "        kind=Structure",
            "          kind=Module, text=\"Swift\"",
            "          kind=Identifier, text=\"Int\"",
        ])
    );
}

#[test]
fn subscript_getter_drops_storage_name() {
    assert_eq!(
        dump("_TF3foog9subscriptFSiSS"),
        lines(&[
            "kind=Global",
            "  kind=Getter",
            "    kind=Subscript",
            "      kind=Module, text=\"foo\"",
            "      kind=Type",
            "        kind=FunctionType",
            "          kind=ArgumentTuple",
            "            kind=Type",
            "              kind=Structure",
            "                kind=Module, text=\"Swift\"",
            "                kind=Identifier, text=\"Int\"",
            "          kind=ReturnType",
            "            kind=Type",
            "              kind=Structure",
            "                kind=Module, text=\"Swift\"",
            "                kind=Identifier, text=\"String\"",
        ])
    );
}

#[test]
fn private_subscript_keeps_discriminator_after_type() {
    assert_eq!(
        dump("_TF3foosP5_hash9subscriptSi"),
        lines(&[
            "kind=Global",
            "  kind=Setter",
            "    kind=Subscript",
            "      kind=Module, text=\"foo\"",
            "      kind=Type",
            "        kind=Structure",
            "          kind=Module, text=\"Swift\"",
            "          kind=Identifier, text=\"Int\"",
            "      kind=PrivateDeclName",
            "        kind=Identifier, text=\"_hash\"",
        ])
    );
}

#[test]
fn addressors() {
    assert_eq!(
        top_kinds("_TF3fooau1xSi"),
        vec![NodeKind::UnsafeMutableAddressor]
    );
    assert_eq!(top_kinds("_TF3foolO1xSi"), vec![NodeKind::OwningAddressor]);
    assert!(demangle_symbol("_TF3fooaz1xSi").is_none());
}

#[test]
fn explicit_closure() {
    assert_eq!(
        dump("_TF3fooU_FT_T_"),
        lines(&[
            "kind=Global",
            "  kind=ExplicitClosure",
            "    kind=Module, text=\"foo\"",
            "    kind=Number, index=0",
            "    kind=Type",
            "      kind=FunctionType",
            "        kind=ArgumentTuple",
            "          kind=Type",
            "            kind=Tuple",
            "        kind=ReturnType",
            "          kind=Type",
            "            kind=Tuple",
        ])
    );
}

#[test]
fn variable_initializer() {
    assert_eq!(
        dump("_TIvV3foo3Bar1xSii"),
        lines(&[
            "kind=Global",
            "  kind=Initializer",
            "    kind=Variable",
            "      kind=Structure",
            "        kind=Module, text=\"foo\"",
            "        kind=Identifier, text=\"Bar\"",
            "      kind=Identifier, text=\"x\"",
            "      kind=Type",
            "        kind=Structure",
            "          kind=Module, text=\"Swift\"",
            "          kind=Identifier, text=\"Int\"",
        ])
    );
}

#[test]
fn default_argument_initializer() {
    assert_eq!(
        dump("_TIF3foo3barFT_T_A0_"),
        lines(&[
            "kind=Global",
            "  kind=DefaultArgumentInitializer",
            "    kind=Function",
            "      kind=Module, text=\"foo\"",
            "      kind=Identifier, text=\"bar\"",
            "      kind=Type",
            "        kind=FunctionType",
            "          kind=ArgumentTuple",
            "            kind=Type",
            "              kind=Tuple",
            "          kind=ReturnType",
            "            kind=Type",
            "              kind=Tuple",
            "    kind=Number, index=1",
        ])
    );
}

#[test]
fn extension_context() {
    let tree = tree("_TFE3fooV3bar3Baz3quxfS1_FT_T_");
    let function = tree.children(tree.root())[0];
    let extension = tree.children(function)[0];
    assert_eq!(tree.kind(extension), NodeKind::Extension);
    let kinds: Vec<_> = tree
        .children(extension)
        .iter()
        .map(|&child| tree.kind(child))
        .collect();
    assert_eq!(kinds, vec![NodeKind::Module, NodeKind::Structure]);
}

#[test]
fn nested_bound_generic_applies_outer_arguments_first() {
    assert_eq!(
        dump_type("GVV3foo5Outer5InnerSi_SS_"),
        lines(&[
            "kind=Type",
            "  kind=BoundGenericStructure",
            "    kind=Type",
            "      kind=Structure",
            "        kind=BoundGenericStructure",
            "          kind=Type",
            "            kind=Structure",
            "              kind=Module, text=\"foo\"",
            "              kind=Identifier, text=\"Outer\"",
            "          kind=TypeList",
            "            kind=Type",
            "              kind=Structure",
            "                kind=Module, text=\"Swift\"",
            "                kind=Identifier, text=\"Int\"",
            "        kind=Identifier, text=\"Inner\"",
            "    kind=TypeList",
            "      kind=Type",
            "        kind=Structure",
            "          kind=Module, text=\"Swift\"",
            "          kind=Identifier, text=\"String\"",
        ])
    );
}

#[test]
fn empty_argument_list_keeps_parent_unbound() {
    assert_eq!(
        dump_type("GVV3foo5Outer5Inner_SS_"),
        lines(&[
            "kind=Type",
            "  kind=BoundGenericStructure",
            "    kind=Type",
            "      kind=Structure",
            "        kind=Structure",
            "          kind=Module, text=\"foo\"",
            "          kind=Identifier, text=\"Outer\"",
            "        kind=Identifier, text=\"Inner\"",
            "    kind=TypeList",
            "      kind=Type",
            "        kind=Structure",
            "          kind=Module, text=\"Swift\"",
            "          kind=Identifier, text=\"String\"",
        ])
    );
}

#[test]
fn bound_generic_protocol_is_rejected() {
    assert!(crate::demangle_type("GP3foo3BarSi_").is_none());
}

#[test]
fn protocol_conformance() {
    assert_eq!(
        production("Si3foo3BazS_", |d| d.protocol_conformance()),
        Some(lines(&[
            "kind=ProtocolConformance",
            "  kind=Type",
            "    kind=Structure",
            "      kind=Module, text=\"Swift\"",
            "      kind=Identifier, text=\"Int\"",
            "  kind=Type",
            "    kind=Protocol",
            "      kind=Module, text=\"foo\"",
            "      kind=Identifier, text=\"Baz\"",
            "  kind=Module, text=\"foo\"",
        ]))
    );
}

#[test]
fn stdlib_protocol() {
    assert_eq!(
        production("s8Hashable", |d| d.protocol_name()),
        Some(lines(&[
            "kind=Type",
            "  kind=Protocol",
            "    kind=Module, text=\"Swift\"",
            "    kind=Identifier, text=\"Hashable\"",
        ]))
    );
}

#[test]
fn module_substitution_must_name_a_module() {
    assert_eq!(
        production("So", |d| d.module()),
        Some(lines(&["kind=Module, text=\"__ObjC\""]))
    );
    assert_eq!(production("Sb", |d| d.module()), None);
}
