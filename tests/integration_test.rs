use word14asm::assembler::assemble_source;
use word14asm::ast::SymbolKind;
use word14asm::errors::AssemblyError;

#[test]
fn hello_world_program() {
    let result = assemble_source("MAIN: mov #5, r3\nhlt\n");
    assert!(result.errors.is_empty());
    assert_eq!(result.unit.code_image, vec![12, 20]);
    assert_eq!(result.unit.symbol_table["MAIN"].address, 100);
}

#[test]
fn double_register_operands_pack_into_one_extra_word() {
    let result = assemble_source("add r1, r2\n");
    assert!(result.errors.is_empty());
    assert_eq!(result.unit.code_image, vec![188, 40]);
}

#[test]
fn external_reference_records_use_site() {
    let result = assemble_source(".extern EXT\njmp EXT\n");
    assert!(result.errors.is_empty());
    assert_eq!(result.unit.code_image[0], 580);
    assert_eq!(
        result.unit.externals_list,
        vec![word14asm::assembler::translation_unit::ExternalUse {
            name: "EXT".to_string(),
            address: 101,
        }]
    );
}

#[test]
fn fixed_index_operand_with_deferred_constant() {
    let result = assemble_source(".define SZ = 3\nLIST: .data 10, 20, 30\nmov LIST[SZ], r0\n");
    assert!(result.errors.is_empty());
    // opcode word + fixed-index label word + fixed-index index word;
    // the lone register destination adds no word of its own
    assert_eq!(result.unit.code_image.len(), 3);
}

#[test]
fn entry_and_data_label_round_trip() {
    let result = assemble_source(".entry LIST\nLIST: .data 1, 2, 3\nhlt\n");
    assert!(result.errors.is_empty());
    assert_eq!(result.unit.entry_list.len(), 1);
    assert_eq!(result.unit.entry_list[0].kind, SymbolKind::EntryDataLabel);
    // one code word (hlt) before relocation, so LIST sits right after it
    assert_eq!(result.unit.symbol_table["LIST"].address, 101);
}

#[test]
fn string_directive_appends_null_terminator() {
    let result = assemble_source("MSG: .string \"hi\"\n");
    assert!(result.errors.is_empty());
    assert_eq!(result.unit.data_image, vec!['h' as u16, 'i' as u16, 0]);
}

#[test]
fn a_full_run_collects_every_error_instead_of_stopping_at_the_first() {
    let result = assemble_source(
        "A: hlt\nA: hlt\nmov #5000, r0\n.extern FOO\n.entry FOO\n",
    );
    assert_eq!(result.errors.len(), 3);
    assert!(result
        .errors
        .iter()
        .any(|e| matches!(e, AssemblyError::DuplicateSymbol { .. })));
    assert!(result
        .errors
        .iter()
        .any(|e| matches!(e, AssemblyError::BitOverflow { .. })));
    assert!(result
        .errors
        .iter()
        .any(|e| matches!(e, AssemblyError::ExternCannotBeEntry { .. })));
}

#[test]
fn undefined_label_reference_is_reported() {
    let result = assemble_source("jmp NOWHERE\n");
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(result.errors[0], AssemblyError::UnfoundLabel { .. }));
}

#[test]
fn label_on_extern_line_is_ignored_with_a_warning() {
    let result = assemble_source("SKIP: .extern FOO\n");
    assert!(result.errors.is_empty());
    assert!(!result.unit.symbol_table.contains_key("SKIP"));
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn immediate_value_at_the_twelve_bit_boundary_is_accepted() {
    let result = assemble_source("mov #2047, r0\n");
    assert!(result.errors.is_empty());

    let overflow = assemble_source("mov #2048, r0\n");
    assert_eq!(overflow.errors.len(), 1);
    assert!(matches!(overflow.errors[0], AssemblyError::BitOverflow { .. }));
}

#[test]
fn end_to_end_output_files_are_written_for_a_clean_program() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("prog");

    let result = word14asm::assemble_file(
        ".entry MAIN\n.extern EXT\nMAIN: jmp EXT\nhlt\n",
        &base,
    )
    .unwrap();
    assert!(result.errors.is_empty());

    assert!(base.with_extension("ob").exists());
    assert!(base.with_extension("ent").exists());
    assert!(base.with_extension("ext").exists());
}

#[test]
fn end_to_end_no_output_files_are_written_when_errors_are_present() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("broken");

    let outcome = word14asm::assemble_file("A: hlt\nA: hlt\n", &base);
    assert!(outcome.is_err());
    assert!(!base.with_extension("ob").exists());
}
