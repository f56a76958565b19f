//! Static opcode tables (spec.md §4.3, §3): mnemonic lookup, operand
//! arity, and the allowed addressing-mode set per (opcode, position).

/// Addressing-mode tag, numbered exactly as spec.md §3 fixes the 2-bit
/// encoding: 0=immediate, 1=direct, 2=fixed-index, 3=direct-register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressingKind {
    Immediate = 0,
    Direct = 1,
    FixedIndex = 2,
    DirectRegister = 3,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Arity {
    Two,
    One,
    None,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Opcode {
    Mov,
    Cmp,
    Add,
    Sub,
    Not,
    Clr,
    Lea,
    Inc,
    Dec,
    Jmp,
    Bne,
    Red,
    Prn,
    Jsr,
    Rts,
    Hlt,
}

pub const MNEMONICS: &[&str] = &[
    "mov", "cmp", "add", "sub", "not", "clr", "lea", "inc", "dec", "jmp", "bne", "red", "prn",
    "jsr", "rts", "hlt",
];

struct OpcodeInfo {
    opcode: Opcode,
    mnemonic: &'static str,
    arity: Arity,
    src_modes: &'static [AddressingKind],
    dst_modes: &'static [AddressingKind],
}

use AddressingKind::*;

const ALL_MODES: &[AddressingKind] = &[Immediate, Direct, FixedIndex, DirectRegister];
const DIRECT_ONLY_DST: &[AddressingKind] = &[Direct, FixedIndex, DirectRegister];
const LEA_SRC: &[AddressingKind] = &[Direct, FixedIndex];
const JUMP_DST: &[AddressingKind] = &[Direct, DirectRegister];
const NONE_MODES: &[AddressingKind] = &[];

const TABLE: &[OpcodeInfo] = &[
    OpcodeInfo {
        opcode: Opcode::Mov,
        mnemonic: "mov",
        arity: Arity::Two,
        src_modes: ALL_MODES,
        dst_modes: DIRECT_ONLY_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Cmp,
        mnemonic: "cmp",
        arity: Arity::Two,
        src_modes: ALL_MODES,
        dst_modes: ALL_MODES,
    },
    OpcodeInfo {
        opcode: Opcode::Add,
        mnemonic: "add",
        arity: Arity::Two,
        src_modes: ALL_MODES,
        dst_modes: DIRECT_ONLY_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Sub,
        mnemonic: "sub",
        arity: Arity::Two,
        src_modes: ALL_MODES,
        dst_modes: DIRECT_ONLY_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Not,
        mnemonic: "not",
        arity: Arity::One,
        src_modes: NONE_MODES,
        dst_modes: DIRECT_ONLY_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Clr,
        mnemonic: "clr",
        arity: Arity::One,
        src_modes: NONE_MODES,
        dst_modes: DIRECT_ONLY_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Lea,
        mnemonic: "lea",
        arity: Arity::Two,
        src_modes: LEA_SRC,
        dst_modes: DIRECT_ONLY_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Inc,
        mnemonic: "inc",
        arity: Arity::One,
        src_modes: NONE_MODES,
        dst_modes: DIRECT_ONLY_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Dec,
        mnemonic: "dec",
        arity: Arity::One,
        src_modes: NONE_MODES,
        dst_modes: DIRECT_ONLY_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Jmp,
        mnemonic: "jmp",
        arity: Arity::One,
        src_modes: NONE_MODES,
        dst_modes: JUMP_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Bne,
        mnemonic: "bne",
        arity: Arity::One,
        src_modes: NONE_MODES,
        dst_modes: JUMP_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Red,
        mnemonic: "red",
        arity: Arity::One,
        src_modes: NONE_MODES,
        dst_modes: DIRECT_ONLY_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Prn,
        mnemonic: "prn",
        arity: Arity::One,
        src_modes: NONE_MODES,
        dst_modes: ALL_MODES,
    },
    OpcodeInfo {
        opcode: Opcode::Jsr,
        mnemonic: "jsr",
        arity: Arity::One,
        src_modes: NONE_MODES,
        dst_modes: JUMP_DST,
    },
    OpcodeInfo {
        opcode: Opcode::Rts,
        mnemonic: "rts",
        arity: Arity::None,
        src_modes: NONE_MODES,
        dst_modes: NONE_MODES,
    },
    OpcodeInfo {
        opcode: Opcode::Hlt,
        mnemonic: "hlt",
        arity: Arity::None,
        src_modes: NONE_MODES,
        dst_modes: NONE_MODES,
    },
];

pub fn lookup_mnemonic(word: &str) -> Option<Opcode> {
    let lower = word.to_ascii_lowercase();
    TABLE
        .iter()
        .find(|info| info.mnemonic == lower)
        .map(|info| info.opcode)
}

fn info(opcode: Opcode) -> &'static OpcodeInfo {
    TABLE
        .iter()
        .find(|info| info.opcode == opcode)
        .expect("every Opcode variant has a table entry")
}

pub fn arity(opcode: Opcode) -> Arity {
    info(opcode).arity
}

pub fn allowed_src_modes(opcode: Opcode) -> &'static [AddressingKind] {
    info(opcode).src_modes
}

pub fn allowed_dst_modes(opcode: Opcode) -> &'static [AddressingKind] {
    info(opcode).dst_modes
}

pub fn mnemonic(opcode: Opcode) -> &'static str {
    info(opcode).mnemonic
}

/// 4-bit numeric code (0..15) in declaration order, per spec.md §3.
pub fn code(opcode: Opcode) -> u16 {
    TABLE
        .iter()
        .position(|info| info.opcode == opcode)
        .expect("every Opcode variant has a table entry") as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_declared_order() {
        assert_eq!(code(Opcode::Mov), 0);
        assert_eq!(code(Opcode::Hlt), 15);
        assert_eq!(code(Opcode::Jsr), 13);
    }

    #[test]
    fn mnemonic_lookup_is_case_insensitive() {
        assert_eq!(lookup_mnemonic("MOV"), Some(Opcode::Mov));
        assert_eq!(lookup_mnemonic("Hlt"), Some(Opcode::Hlt));
        assert_eq!(lookup_mnemonic("nope"), None);
    }

    #[test]
    fn mov_forbids_immediate_destination() {
        assert!(!allowed_dst_modes(Opcode::Mov).contains(&Immediate));
        assert!(allowed_src_modes(Opcode::Mov).contains(&Immediate));
    }

    #[test]
    fn jmp_only_allows_direct_and_register_destination() {
        let dst = allowed_dst_modes(Opcode::Jmp);
        assert_eq!(dst, JUMP_DST);
        assert!(!dst.contains(&FixedIndex));
    }

    #[test]
    fn rts_and_hlt_take_no_operands() {
        assert_eq!(arity(Opcode::Rts), Arity::None);
        assert_eq!(arity(Opcode::Hlt), Arity::None);
    }
}
