use pretty_assertions::assert_eq;

use crate::opcodes::{
    CMP_OP, OpcodeDef, OpcodeTable, OperandCategory, TableDescriptor, TableError, python27,
    python34, python35,
};
use crate::{String, ToString, Vec, vec};

fn minimal() -> crate::opcodes::OpcodeTableBuilder {
    OpcodeTable::builder("toy")
        .have_argument(90)
        .def_op("POP_TOP", 1)
        .jrel_op("JUMP_FORWARD", 110)
        .extended_arg("EXTENDED_ARG", 144)
}

#[test]
fn test_builder_fills_undefined_codes() {
    let table = minimal().build().unwrap();

    assert_eq!(table.version(), "toy");
    assert_eq!(table.len(), 3);
    assert_eq!(table.mnemonic(1), "POP_TOP");
    assert_eq!(table.mnemonic(0), "<0>");
    assert_eq!(table.mnemonic(255), "<255>");
    assert_eq!(table.opcode("JUMP_FORWARD"), Some(110));
    assert_eq!(table.opcode("<0>"), None);
    assert_eq!(table.category(110), OperandCategory::RelativeJump);
    assert_eq!(table.category(200), OperandCategory::Plain);
    assert!(table.has_argument(90));
    assert!(!table.has_argument(89));
    assert!(table.compare_ops().is_empty());
}

#[test]
fn test_duplicate_opcode_rejected() {
    let err = minimal().def_op("NOP", 1).build().unwrap_err();
    assert_eq!(
        err,
        TableError::DuplicateOpcode {
            code: 1,
            first: String::from("POP_TOP"),
            second: String::from("NOP"),
        }
    );
}

#[test]
fn test_duplicate_name_rejected() {
    let err = minimal().def_op("POP_TOP", 2).build().unwrap_err();
    assert_eq!(
        err,
        TableError::DuplicateName {
            name: String::from("POP_TOP"),
            first: 1,
            second: 2,
        }
    );
}

#[test]
fn test_category_below_threshold_rejected() {
    let err = minimal().const_op("LOAD_CONST", 20).build().unwrap_err();
    assert_eq!(
        err,
        TableError::OperandBelowThreshold {
            name: String::from("LOAD_CONST"),
            code: 20,
            category: OperandCategory::Const,
            have_argument: 90,
        }
    );
    assert_eq!(
        err.to_string(),
        "LOAD_CONST (20) takes a constant operand but is below the argument threshold 90"
    );
}

#[test]
fn test_extended_arg_required() {
    let err = OpcodeTable::builder("toy")
        .have_argument(90)
        .def_op("POP_TOP", 1)
        .build()
        .unwrap_err();
    assert_eq!(err, TableError::MissingExtendedArg);

    let err = OpcodeTable::builder("toy")
        .have_argument(90)
        .extended_arg("EXTENDED_ARG", 10)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        TableError::ExtendedArgWithoutOperand {
            code: 10,
            have_argument: 90,
        }
    );
}

#[test]
fn test_python27_table() {
    let table = python27().unwrap();

    assert_eq!(table.version(), "2.7");
    assert_eq!(table.have_argument(), 90);
    assert_eq!(table.extended_arg(), 145);
    assert_eq!(table.mnemonic(145), "EXTENDED_ARG");
    assert_eq!(table.opcode("PRINT_ITEM"), Some(71));
    assert_eq!(table.category(131), OperandCategory::VariadicCall);
    assert_eq!(table.compare_ops(), CMP_OP);

    let jrel: Vec<u8> = table.uses(OperandCategory::RelativeJump).collect();
    assert_eq!(jrel, [93, 110, 120, 121, 122, 143]);
    let jabs: Vec<u8> = table.uses(OperandCategory::AbsoluteJump).collect();
    assert_eq!(jabs, [111, 112, 113, 114, 115, 119]);
}

#[test]
fn test_python34_table() {
    let table = python34().unwrap();

    assert_eq!(table.version(), "3.4");
    assert_eq!(table.extended_arg(), 144);
    assert_eq!(table.mnemonic(54), "STORE_MAP");
    assert_eq!(table.mnemonic(81), "WITH_CLEANUP");
    assert_eq!(table.opcode("PRINT_ITEM"), None);
    assert_eq!(table.category(148), OperandCategory::Free);
    let locals: Vec<u8> = table.uses(OperandCategory::Local).collect();
    assert_eq!(locals, [124, 125, 126]);
}

#[test]
fn test_python35_table() {
    let table = python35().unwrap();

    assert_eq!(table.version(), "3.5");
    assert_eq!(table.mnemonic(54), "<54>");
    assert_eq!(table.mnemonic(81), "WITH_CLEANUP_START");
    assert_eq!(table.mnemonic(82), "WITH_CLEANUP_FINISH");
    assert_eq!(table.opcode("BINARY_MATRIX_MULTIPLY"), Some(16));
    assert_eq!(table.category(154), OperandCategory::RelativeJump);
    assert_eq!(table.category(100), OperandCategory::Const);
    assert_eq!(table.category(107), OperandCategory::Compare);

    let compare: Vec<u8> = table.uses(OperandCategory::Compare).collect();
    assert_eq!(compare, [107]);
    let consts: Vec<u8> = table.uses(OperandCategory::Const).collect();
    assert_eq!(consts, [100]);
}

#[test]
fn test_every_category_is_above_threshold() {
    for table in [python27(), python34(), python35()] {
        let table = table.unwrap();
        for def in table.definitions() {
            if def.category != OperandCategory::Plain {
                assert!(table.has_argument(def.code), "{} in {}", def.name, table.version());
            }
        }
    }
}

#[test]
fn test_definitions_sorted_by_code() {
    let table = minimal().build().unwrap();
    let defs: Vec<OpcodeDef> = table.definitions().collect();
    assert_eq!(
        defs,
        vec![
            OpcodeDef {
                name: String::from("POP_TOP"),
                code: 1,
                category: OperandCategory::Plain,
            },
            OpcodeDef {
                name: String::from("JUMP_FORWARD"),
                code: 110,
                category: OperandCategory::RelativeJump,
            },
            OpcodeDef {
                name: String::from("EXTENDED_ARG"),
                code: 144,
                category: OperandCategory::Plain,
            },
        ]
    );
}

#[test]
fn test_descriptor_conversion() {
    let table = python35().unwrap();
    let descriptor = TableDescriptor::from(table.clone());

    assert_eq!(descriptor.version, "3.5");
    assert_eq!(descriptor.opcodes.len(), table.len());
    assert_eq!(OpcodeTable::try_from(descriptor).unwrap(), table);
}

#[test]
fn test_invalid_descriptor_rejected() {
    let descriptor = TableDescriptor {
        version: "bad".to_string(),
        have_argument: 90,
        extended_arg: 144,
        compare_ops: Vec::new(),
        opcodes: vec![
            OpcodeDef {
                name: "A".to_string(),
                code: 100,
                category: OperandCategory::Const,
            },
            OpcodeDef {
                name: "B".to_string(),
                code: 100,
                category: OperandCategory::Name,
            },
        ],
    };
    assert!(matches!(
        OpcodeTable::try_from(descriptor),
        Err(TableError::DuplicateOpcode { code: 100, .. })
    ));
}

#[test]
fn test_debug_lists_categories() {
    let table = minimal().build().unwrap();
    let rendered = crate::format!("{:?}", table);

    assert!(rendered.contains("version: toy"));
    assert!(rendered.contains("extended_arg: 144 (EXTENDED_ARG)"));
    assert!(rendered.contains("    1 POP_TOP\n"));
    assert!(rendered.contains("  110 JUMP_FORWARD (relative jump)"));
}

#[test]
fn test_categories_partition_opcode_space() {
    let table = python35().unwrap();
    let total: usize = OperandCategory::ALL
        .iter()
        .map(|&category| table.uses(category).count())
        .sum();
    assert_eq!(total, 256);

    let jumps: Vec<OperandCategory> = OperandCategory::ALL
        .into_iter()
        .filter(|category| category.is_jump())
        .collect();
    assert_eq!(
        jumps,
        [OperandCategory::RelativeJump, OperandCategory::AbsoluteJump]
    );
}

#[test]
fn test_extended_arg_must_be_defined() {
    let err = OpcodeTable::builder("toy")
        .have_argument(90)
        .def_op("POP_TOP", 1)
        .extended_arg_code(144)
        .build()
        .unwrap_err();
    assert_eq!(err, TableError::UndefinedExtendedArg { code: 144 });

    let descriptor = TableDescriptor {
        version: "toy".to_string(),
        have_argument: 90,
        extended_arg: 144,
        compare_ops: Vec::new(),
        opcodes: Vec::new(),
    };
    assert_eq!(
        OpcodeTable::try_from(descriptor),
        Err(TableError::UndefinedExtendedArg { code: 144 })
    );
}

#[test]
fn test_extended_arg_must_be_plain() {
    let err = OpcodeTable::builder("toy")
        .have_argument(90)
        .jrel_op("EXTENDED_ARG", 144)
        .extended_arg_code(144)
        .build()
        .unwrap_err();
    let expected = TableError::ExtendedArgWithCategory {
        name: String::from("EXTENDED_ARG"),
        code: 144,
        category: OperandCategory::RelativeJump,
    };
    assert_eq!(err, expected);
    assert_eq!(
        err.to_string(),
        "extended-argument opcode EXTENDED_ARG (144) has category relative jump, expected plain"
    );

    let descriptor = TableDescriptor {
        version: "toy".to_string(),
        have_argument: 90,
        extended_arg: 144,
        compare_ops: Vec::new(),
        opcodes: vec![OpcodeDef {
            name: "EXTENDED_ARG".to_string(),
            code: 144,
            category: OperandCategory::RelativeJump,
        }],
    };
    assert_eq!(OpcodeTable::try_from(descriptor), Err(expected));
}
