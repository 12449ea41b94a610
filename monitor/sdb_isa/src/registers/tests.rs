#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_reset_state() {
    let regs = RegisterFile::new();
    assert_eq!(regs.read("pc"), Some(RESET_VECTOR));
    for name in REG_NAMES {
        assert_eq!(regs.read(name), Some(0), "{name}");
    }
}

#[test]
fn test_read_by_name() {
    let mut regs = RegisterFile::new();
    regs.write("a0", 5).unwrap();
    regs.write("t6", 0xdead_beef).unwrap();
    assert_eq!(regs.read("a0"), Some(5));
    assert_eq!(regs.read("t6"), Some(0xdead_beef));
    assert_eq!(regs.read("pc"), Some(RESET_VECTOR));
}

#[test]
fn test_names_are_case_sensitive() {
    let regs = RegisterFile::new();
    assert_eq!(regs.read("A0"), None);
    assert_eq!(regs.read("PC"), None);
    assert_eq!(regs.read("x10"), None);
    assert_eq!(regs.read(""), None);
}

#[test]
fn test_zero_is_hardwired() {
    let mut regs = RegisterFile::new();
    assert_eq!(regs.write("zero", 42), Ok(()));
    assert_eq!(regs.read("zero"), Some(0));
}

#[test]
fn test_write_unknown_register() {
    let mut regs = RegisterFile::new();
    let err = regs.write("x99", 1).unwrap_err();
    assert_eq!(
        err,
        RegisterError::Unknown {
            name: "x99".to_owned()
        }
    );
    assert_eq!(err.to_string(), "unknown register `x99`");
}

#[test]
fn test_step_advances_pc() {
    let mut regs = RegisterFile::new();
    regs.step();
    regs.step();
    assert_eq!(regs.read("pc"), Some(RESET_VECTOR + 8));

    regs.write("pc", 0xffff_fffc).unwrap();
    regs.step();
    assert_eq!(regs.read("pc"), Some(0));
}

#[test]
fn test_step_leaves_gprs_alone() {
    let mut regs = RegisterFile::new();
    regs.write("sp", 0x100).unwrap();
    regs.step();
    assert_eq!(regs.read("sp"), Some(0x100));
}

#[test]
fn test_display_format() {
    let mut regs = RegisterFile::new();
    regs.write("ra", 0xffff_ffff).unwrap();
    regs.write("s11", 17).unwrap();
    let dump = regs.display();
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), GPR_COUNT + 1);
    assert_eq!(lines[0], "zero 0x00000000 0");
    assert_eq!(lines[1], "ra   0xffffffff -1");
    assert_eq!(lines[27], "s11  0x00000011 17");
    assert_eq!(lines[32], "pc   0x80000000 -2147483648");
}

#[test]
fn test_every_name_evaluates_to_its_value() {
    let mut regs = RegisterFile::new();
    for (i, name) in REG_NAMES.iter().enumerate().skip(1) {
        regs.write(name, u32::try_from(i).unwrap() * 0x0101).unwrap();
    }
    for name in REG_NAMES.iter().chain(std::iter::once(&"pc")) {
        let text = format!("${name}");
        assert_eq!(sdb_eval::expr(&text, &regs), Ok(regs.resolve(name).unwrap()));
    }
}
