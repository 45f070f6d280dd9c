use std::collections::HashMap;

thread_local!(
    static MNEMONIC_TO_OPCODE: HashMap<&'static str, Opcode> =
        CATALOG.iter().map(|entry| (entry.1, entry.0)).collect();
);

/// ## Virtual machine instruction catalog
///
/// The SLVM machine is built around a single accumulator. Most
/// instructions work between the accumulator and one named variable,
/// with operands occupying the tape slots after the instruction.
///
/// For example: `x = x + 5` compiles to
/// `[loadAtVar x, ldi 5, storeAtVar t, addWithVar t, storeAtVar x]`
/// with each bracketed element on its own tape slot.
///
/// The catalog is ordered; everything after [`Opcode::Contains`] is
/// declared for forward compatibility and has no semantics yet.
/// Executing those halts the machine, as does executing the handful of
/// interleaved input-polling entries (`mouseDown` through `mouseY`,
/// `isKeyPressed`, `createColor`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Opcode {
    // *** Data movement
    Ldi,
    LoadAtVar,
    StoreAtVar,

    // *** Subroutines
    Jts,
    Ret,

    // *** Accumulator arithmetic
    AddWithVar,
    SubWithVar,
    MulWithVar,
    DivWithVar,
    BitwiseLsfWithVar,
    BitwiseRsfWithVar,
    BitwiseAndWithVar,
    BitwiseOrWithVar,
    ModWithVar,

    // *** Text output
    Print,
    Println,

    // *** Branches
    Jmp,
    Jt,
    Jf,

    // *** Boolean and relational
    BoolAndWithVar,
    BoolOrWithVar,
    BoolEqualWithVar,
    LargerThanOrEqualWithVar,
    SmallerThanOrEqualWithVar,
    BoolNotEqualWithVar,
    SmallerThanWithVar,
    LargerThanWithVar,

    // *** Graphics
    PutPixel,
    PutLine,
    PutRect,
    SetColor,
    Clg,

    // *** Termination and allocation
    Done,
    Malloc,

    // *** Math intrinsics
    Round,
    Floor,
    Ceil,
    Cos,
    Sin,
    Sqrt,
    Atan2,

    // *** Input polling (catalog only)
    MouseDown,
    MouseX,
    MouseY,

    Sleep,
    DrawText,
    LoadAtVarWithOffset,
    StoreAtVarWithOffset,
    IsKeyPressed,
    CreateColor,

    // *** Text inspection
    CharAt,
    SizeOf,
    Contains,

    // *** Declared ahead of semantics (catalog only)
    Join,
    SetStrokeWidth,
    Inc,
    Dec,
    GraphicsFlip,
    NewLine,
    Ask,
    SetCloudVar,
    GetCloudVar,
    IndexOfChar,
    Goto,
    Imalloc,
    GetValueAtPointer,
    SetValueAtPointer,
    RuntimeMillis,
    Free,
    GetVarAddress,
    SetVarAddress,
    CopyVar,
    IncA,
    DecA,
    ArrayBoundsCheck,
    GetValueAtPointerOfA,
    StackPushA,
    StackPopA,
    StackPush,
    StackPop,
    StackPeekA,
    StackPeek,
    StackInc,
    StackDec,
    StackAdd,
    StackSub,
    StackMul,
    StackDiv,
    StackBitwiseLsf,
    StackBitwiseRsf,
    StackBitwiseAnd,
    StackBitwiseOr,
    StackMod,
    StackBoolAnd,
    StackBoolOr,
    StackBoolEqual,
    StackLargerThanOrEqual,
    StackSmallerThanOrEqual,
    StackNotEqual,
    StackSmallerThan,
    StackLargerThan,
    ConditionalValueSet,
}

/// Catalog entry: opcode, mnemonic, trailing operand slots.
const CATALOG: &[(Opcode, &str, usize)] = {
    use Opcode::*;
    &[
        (Ldi, "ldi", 1),
        (LoadAtVar, "loadAtVar", 1),
        (StoreAtVar, "storeAtVar", 1),
        (Jts, "jts", 1),
        (Ret, "ret", 0),
        (AddWithVar, "addWithVar", 1),
        (SubWithVar, "subWithVar", 1),
        (MulWithVar, "mulWithVar", 1),
        (DivWithVar, "divWithVar", 1),
        (BitwiseLsfWithVar, "bitwiseLsfWithVar", 1),
        (BitwiseRsfWithVar, "bitwiseRsfWithVar", 1),
        (BitwiseAndWithVar, "bitwiseAndWithVar", 1),
        (BitwiseOrWithVar, "bitwiseOrWithVar", 1),
        (ModWithVar, "modWithVar", 1),
        (Print, "print", 0),
        (Println, "println", 0),
        (Jmp, "jmp", 1),
        (Jt, "jt", 1),
        (Jf, "jf", 1),
        (BoolAndWithVar, "boolAndWithVar", 1),
        (BoolOrWithVar, "boolOrWithVar", 1),
        (BoolEqualWithVar, "boolEqualWithVar", 1),
        (LargerThanOrEqualWithVar, "largerThanOrEqualWithVar", 1),
        (SmallerThanOrEqualWithVar, "smallerThanOrEqualWithVar", 1),
        (BoolNotEqualWithVar, "boolNotEqualWithVar", 1),
        (SmallerThanWithVar, "smallerThanWithVar", 1),
        (LargerThanWithVar, "largerThanWithVar", 1),
        (PutPixel, "putPixel", 2),
        (PutLine, "putLine", 4),
        (PutRect, "putRect", 4),
        (SetColor, "setColor", 1),
        (Clg, "clg", 0),
        (Done, "done", 0),
        (Malloc, "malloc", 1),
        (Round, "round", 2),
        (Floor, "floor", 2),
        (Ceil, "ceil", 2),
        (Cos, "cos", 1),
        (Sin, "sin", 1),
        (Sqrt, "sqrt", 1),
        (Atan2, "atan2", 2),
        (MouseDown, "mouseDown", 0),
        (MouseX, "mouseX", 0),
        (MouseY, "mouseY", 0),
        (Sleep, "sleep", 1),
        (DrawText, "drawText", 0),
        (LoadAtVarWithOffset, "loadAtVarWithOffset", 2),
        (StoreAtVarWithOffset, "storeAtVarWithOffset", 2),
        (IsKeyPressed, "isKeyPressed", 1),
        (CreateColor, "createColor", 3),
        (CharAt, "charAt", 2),
        (SizeOf, "sizeOf", 1),
        (Contains, "contains", 2),
        (Join, "join", 2),
        (SetStrokeWidth, "setStrokeWidth", 1),
        (Inc, "inc", 1),
        (Dec, "dec", 1),
        (GraphicsFlip, "graphicsFlip", 0),
        (NewLine, "newLine", 0),
        (Ask, "ask", 1),
        (SetCloudVar, "setCloudVar", 2),
        (GetCloudVar, "getCloudVar", 1),
        (IndexOfChar, "indexOfChar", 2),
        (Goto, "goto", 1),
        (Imalloc, "imalloc", 1),
        (GetValueAtPointer, "getValueAtPointer", 1),
        (SetValueAtPointer, "setValueAtPointer", 2),
        (RuntimeMillis, "runtimeMillis", 0),
        (Free, "free", 2),
        (GetVarAddress, "getVarAddress", 1),
        (SetVarAddress, "setVarAddress", 2),
        (CopyVar, "copyVar", 2),
        (IncA, "incA", 0),
        (DecA, "decA", 0),
        (ArrayBoundsCheck, "arrayBoundsCheck", 2),
        (GetValueAtPointerOfA, "getValueAtPointerOfA", 0),
        (StackPushA, "stackPushA", 0),
        (StackPopA, "stackPopA", 0),
        (StackPush, "stackPush", 1),
        (StackPop, "stackPop", 1),
        (StackPeekA, "stackPeekA", 0),
        (StackPeek, "stackPeek", 1),
        (StackInc, "stackInc", 0),
        (StackDec, "stackDec", 0),
        (StackAdd, "stackAdd", 0),
        (StackSub, "stackSub", 0),
        (StackMul, "stackMul", 0),
        (StackDiv, "stackDiv", 0),
        (StackBitwiseLsf, "stackBitwiseLsf", 0),
        (StackBitwiseRsf, "stackBitwiseRsf", 0),
        (StackBitwiseAnd, "stackBitwiseAnd", 0),
        (StackBitwiseOr, "stackBitwiseOr", 0),
        (StackMod, "stackMod", 0),
        (StackBoolAnd, "stackBoolAnd", 0),
        (StackBoolOr, "stackBoolOr", 0),
        (StackBoolEqual, "stackBoolEqual", 0),
        (StackLargerThanOrEqual, "stackLargerThanOrEqual", 0),
        (StackSmallerThanOrEqual, "stackSmallerThanOrEqual", 0),
        (StackNotEqual, "stackNotEqual", 0),
        (StackSmallerThan, "stackSmallerThan", 0),
        (StackLargerThan, "stackLargerThan", 0),
        (ConditionalValueSet, "conditionalValueSet", 2),
    ]
};

impl Opcode {
    pub fn from_mnemonic(s: &str) -> Option<Opcode> {
        MNEMONIC_TO_OPCODE.with(|table| table.get(s).copied())
    }

    pub fn mnemonic(self) -> &'static str {
        debug_assert!(CATALOG[self as usize].0 == self);
        CATALOG[self as usize].1
    }

    /// Number of trailing tape slots consumed as operands.
    pub fn operands(self) -> usize {
        debug_assert!(CATALOG[self as usize].0 == self);
        CATALOG[self as usize].2
    }

    /// True when the opcode has execution semantics. Catalog entries
    /// past [`Opcode::Contains`], and the input-polling entries below
    /// it, decode and disassemble but halt on execution.
    pub fn is_implemented(self) -> bool {
        use Opcode::*;
        match self {
            MouseDown | MouseX | MouseY | IsKeyPressed | CreateColor => false,
            _ => self <= Contains,
        }
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}
