use crossdis::listing::{ListingOptions, code_info, render_to, render_to_string};
use crossdis::{
    Bytecode, CodeObject, Constant, DecodeError, Error, OpcodeTable, OperandCategory,
    table_for_version,
};
use indoc::indoc;
use pretty_assertions::assert_eq;

/// `def f(x):\n    if x < 3:\n        return 'a'\n    return x`
fn python35_function() -> CodeObject {
    toml::from_str(indoc! {r#"
        name = "f"
        filename = "<stdin>"
        first_line = 1
        code = [124, 0, 0, 100, 1, 0, 107, 0, 0, 114, 16, 0, 100, 2, 0, 83, 124, 0, 0, 83]
        consts = ["none", { int = 3 }, { str = "a" }]
        varnames = ["x"]
        lnotab = [0, 1, 12, 1, 4, 1]
    "#})
    .unwrap()
}

/// `def f():\n    for i in range(3):\n        print i`
fn python27_loop() -> CodeObject {
    toml::from_str(indoc! {r#"
        name = "f"
        filename = "<stdin>"
        first_line = 1
        code = [
            120, 25, 0,
            116, 0, 0,
            100, 1, 0,
            131, 1, 0,
            68,
            93, 11, 0,
            125, 0, 0,
            124, 0, 0,
            71,
            72,
            113, 13, 0,
            87,
            100, 0, 0,
            83,
        ]
        consts = ["none", { int = 3 }]
        names = ["range"]
        varnames = ["i"]
        lnotab = [0, 1, 13, 1]
    "#})
    .unwrap()
}

const PYTHON35_LISTING: &str = r"  2           0 LOAD_FAST                0 (x)
              3 LOAD_CONST               1 (3)
              6 COMPARE_OP               0 (<)
              9 POP_JUMP_IF_FALSE       16

  3          12 LOAD_CONST               2 ('a')
             15 RETURN_VALUE

  4     >>   16 LOAD_FAST                0 (x)
             19 RETURN_VALUE
";

const PYTHON35_SHIFTED_LISTING: &str = r" 11           0 LOAD_FAST                0 (x)
              3 LOAD_CONST               1 (3)
              6 COMPARE_OP               0 (<)
              9 POP_JUMP_IF_FALSE       16

 12 -->      12 LOAD_CONST               2 ('a')
             15 RETURN_VALUE

 13     >>   16 LOAD_FAST                0 (x)
             19 RETURN_VALUE
";

const PYTHON27_LISTING: &str = r"  2           0 SETUP_LOOP              25 (to 28)
              3 LOAD_GLOBAL              0 (range)
              6 LOAD_CONST               1 (3)
              9 CALL_FUNCTION            1 (1 positional, 0 keyword pair)
             12 GET_ITER

  3     >>   13 FOR_ITER                11 (to 27)
             16 STORE_FAST               0 (i)
             19 LOAD_FAST                0 (i)
             22 PRINT_ITEM
             23 PRINT_NEWLINE
             24 JUMP_ABSOLUTE           13
        >>   27 POP_BLOCK
        >>   28 LOAD_CONST               0 (None)
             31 RETURN_VALUE
";

#[test]
fn test_python35_listing() {
    let code = python35_function();
    let table = table_for_version("3.5").unwrap();
    let bytecode = Bytecode::new(&code, table);

    let text = render_to_string(&bytecode, &ListingOptions::default()).unwrap();
    assert_eq!(text, PYTHON35_LISTING);
}

#[test]
fn test_first_line_and_current_offset() {
    let code = python35_function();
    let table = table_for_version("3.5").unwrap();
    let bytecode = Bytecode::new(&code, table).with_first_line(10);
    let options = ListingOptions {
        current_offset: Some(12),
        ..Default::default()
    };

    let mut out = Vec::new();
    render_to(&bytecode, &options, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), PYTHON35_SHIFTED_LISTING);
}

#[test]
fn test_python27_listing() {
    let code = python27_loop();
    let table = table_for_version("2.7").unwrap();
    let bytecode = Bytecode::new(&code, table);

    let text = render_to_string(&bytecode, &ListingOptions::default()).unwrap();
    assert_eq!(text, PYTHON27_LISTING);

    let mut targets: Vec<_> = bytecode.jump_targets().unwrap().into_iter().collect();
    targets.sort_unstable();
    assert_eq!(targets, [13, 27, 28]);
}

#[test]
fn test_table_loaded_from_toml() {
    let table: OpcodeTable = toml::from_str(indoc! {r#"
        version = "toy"
        have_argument = 0x5A
        extended_arg = 0x90

        [[opcodes]]
        name = "NOP"
        code = 0x01

        [[opcodes]]
        name = "JUMP_REL"
        code = 0x5A
        category = "relative_jump"

        [[opcodes]]
        name = "EXTENDED_ARG"
        code = 0x90
    "#})
    .unwrap();
    assert_eq!(table.category(0x5A), OperandCategory::RelativeJump);

    let code = CodeObject {
        code: vec![0x01, 0x5A, 0x05, 0x00],
        ..Default::default()
    };
    let bytecode = Bytecode::new(&code, &table);
    let options = ListingOptions {
        lineno_width: 0,
        ..Default::default()
    };

    let text = render_to_string(&bytecode, &options).unwrap();
    assert_eq!(
        text,
        "          0 NOP\n          1 JUMP_REL                 5 (to 9)\n"
    );
}

#[test]
fn test_invalid_table_in_toml() {
    let result: Result<OpcodeTable, _> = toml::from_str(indoc! {r#"
        version = "toy"
        have_argument = 90
        extended_arg = 144

        [[opcodes]]
        name = "LOAD_CONST"
        code = 20
        category = "const"
    "#});

    let err = result.unwrap_err();
    assert!(err.to_string().contains("below the argument threshold"));
}

#[test]
fn test_constant_index_out_of_range() {
    let code = CodeObject {
        first_line: 1,
        code: vec![144, 1, 0, 100, 2, 0],
        consts: vec![
            Constant::Str("a".to_string()),
            Constant::Str("b".to_string()),
            Constant::Str("bigconst".to_string()),
        ],
        ..Default::default()
    };
    let table = table_for_version("3.5").unwrap();
    let bytecode = Bytecode::new(&code, table);

    let mut out = Vec::new();
    let err = render_to(&bytecode, &ListingOptions::default(), &mut out).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode(DecodeError::OutOfRange {
            offset: 3,
            category: OperandCategory::Const,
            index: 65538,
            len: 3,
        })
    ));
    // The extended argument is listed before the failing instruction
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "  1           0 EXTENDED_ARG             1\n"
    );
}

#[test]
fn test_truncated_code() {
    let code = CodeObject {
        code: vec![9, 100, 1],
        ..Default::default()
    };
    let table = table_for_version("3.5").unwrap();
    let bytecode = Bytecode::new(&code, table);

    let err = render_to_string(&bytecode, &ListingOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::Decode(DecodeError::Truncated {
            offset: 1,
            opcode: 100,
            available: 1,
        })
    ));
}

#[test]
fn test_code_info() {
    let code = CodeObject {
        cellvars: vec!["total".to_string()],
        freevars: vec!["scale".to_string()],
        ..python35_function()
    };

    assert_eq!(
        code_info(&code).unwrap(),
        indoc! {"
            Name:              f
            Filename:          <stdin>
            First line:        1
            Constants:
               0: None
               1: 3
               2: 'a'
            Variable names:
               0: x
            Free variables:
               0: scale
            Cell variables:
               0: total
        "}
    );
}
