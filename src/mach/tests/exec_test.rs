use super::*;
use crate::mach::{GraphicsCommand, Halt, Runtime};
use std::time::Duration;

#[test]
fn test_load_store_accumulate() {
    let mut r = runtime("ldi\n5\nstoreAtVar\nx\nloadAtVar\nx\naddWithVar\nx\nprintln\ndone");
    assert_eq!(run(&mut r), "10\n");
    assert_eq!(r.halt(), Some(Halt::Completed));
}

#[test]
fn test_print_has_no_terminator() {
    let mut r = runtime("ldi\nA\nprint\nldi\nB\nprintln\ndone");
    assert_eq!(run(&mut r), "AB\n");
}

#[test]
fn test_tape_exhaustion_completes() {
    let mut r = runtime("ldi\nx");
    assert_eq!(run(&mut r), "");
    assert_eq!(r.halt(), Some(Halt::Completed));
}

#[test]
fn test_done_stops_mid_tape() {
    let mut r = runtime("ldi\nfirst\nprintln\ndone\nldi\nsecond\nprintln");
    assert_eq!(run(&mut r), "first\n");
    assert_eq!(r.halt(), Some(Halt::Completed));
}

#[test]
fn test_zero_takes_the_false_branch_of_jt() {
    let mut r = runtime("ldi\n0\njt\n8\nldi\nno\njmp\n10\nldi\nyes\nprintln\ndone");
    assert_eq!(run(&mut r), "no\n");
}

#[test]
fn test_zero_takes_the_jump_of_jf() {
    let mut r = runtime("ldi\n0\njf\n8\nldi\nno\njmp\n10\nldi\nyes\nprintln\ndone");
    assert_eq!(run(&mut r), "yes\n");
}

#[test]
fn test_any_nonzero_value_is_true() {
    // values strictly between zero and one count as true under the
    // nonzero rule
    let mut r = runtime("ldi\n0.5\njt\n8\nldi\nno\njmp\n10\nldi\nyes\nprintln\ndone");
    assert_eq!(run(&mut r), "yes\n");
    let mut r = runtime("ldi\n-1\njt\n8\nldi\nno\njmp\n10\nldi\nyes\nprintln\ndone");
    assert_eq!(run(&mut r), "yes\n");
}

#[test]
fn test_nested_call_and_return() {
    let mut r = runtime(
        "jts\n8\nldi\nM\nprint\ndone\n\n\n\
         ldi\nO\nprint\njts\n16\nret\n\n\n\
         ldi\nI\nprint\nret",
    );
    assert_eq!(run(&mut r), "OIM");
    assert_eq!(r.halt(), Some(Halt::Completed));
}

#[test]
fn test_return_without_call_is_fatal() {
    let mut r = runtime("ret");
    assert_eq!(run(&mut r), "RETURN WITHOUT CALL AT 0\n");
    assert_eq!(r.halt(), Some(Halt::CallStackUnderflow));
}

#[test]
fn test_unknown_opcode_reports_index_and_token() {
    let mut r = runtime("ldi\nok\nprintln\nbogus");
    assert_eq!(run(&mut r), "ok\nUNKNOWN OPCODE AT 3 (`bogus`)\n");
    assert_eq!(r.halt(), Some(Halt::UnknownOpcode));
}

#[test]
fn test_catalog_entries_without_semantics_halt() {
    let mut r = runtime("stackPushA");
    assert_eq!(
        run(&mut r),
        "UNIMPLEMENTED OPCODE AT 0 (`stackPushA`); CATALOG ENTRY HAS NO SEMANTICS\n"
    );
    assert_eq!(r.halt(), Some(Halt::UnimplementedOpcode));

    // input polling sits below the last implemented ordinal but still
    // has no semantics
    let mut r = runtime("mouseDown");
    assert_eq!(
        run(&mut r),
        "UNIMPLEMENTED OPCODE AT 0 (`mouseDown`); CATALOG ENTRY HAS NO SEMANTICS\n"
    );
    assert_eq!(r.halt(), Some(Halt::UnimplementedOpcode));
}

#[test]
fn test_truncated_operand_list_is_fatal() {
    let mut r = runtime("ldi");
    assert_eq!(run(&mut r), "INTERNAL ERROR AT 0; OPERAND PAST END OF TAPE\n");
    assert_eq!(r.halt(), Some(Halt::InternalError));
}

#[test]
fn test_malloc_stores_address_and_exhaustion_halts() {
    // capacity 4: the variable takes one cell, the first malloc the
    // remaining three, the second has nowhere to go
    let source = "ldi\n3\nstoreAtVar\ns\nmalloc\ns\nprintln\nmalloc\ns\ndone";
    let mut r = Runtime::with_capacity(load(source), 4);
    assert_eq!(run(&mut r), "1\nOUT OF MEMORY AT 7; ARENA EXHAUSTED\n");
    assert_eq!(r.halt(), Some(Halt::OutOfMemory));
}

#[test]
fn test_offset_addressing_reaches_neighbor_cells() {
    // variables allocate in first-reference order from address zero,
    // so `a` is cell 0 and `b` is cell 1
    let mut r = runtime(
        "ldi\n10\nstoreAtVar\na\nldi\n20\nstoreAtVar\nb\nldi\n1\nstoreAtVar\nk\n\
         loadAtVarWithOffset\na\nk\nprintln\n\
         ldi\n99\nstoreAtVarWithOffset\na\nk\nloadAtVar\nb\nprintln\ndone",
    );
    assert_eq!(run(&mut r), "20\n99\n");
}

#[test]
fn test_offset_past_arena_is_fatal() {
    let source = "ldi\n100\nstoreAtVar\nk\nloadAtVarWithOffset\nk\nk";
    let mut r = Runtime::with_capacity(load(source), 8);
    assert_eq!(
        run(&mut r),
        "ADDRESS OUT OF RANGE AT 4; CELL FETCH PAST ARENA\n"
    );
    assert_eq!(r.halt(), Some(Halt::AddressOutOfRange));
}

#[test]
fn test_sleep_yields_the_requested_duration() {
    let mut r = runtime("ldi\n250\nstoreAtVar\nt\nsleep\nt\ndone");
    match r.execute(5000) {
        Event::Sleep(duration) => assert_eq!(duration, Duration::from_millis(250)),
        event => panic!("expected sleep, got {:?}", event),
    }
    assert!(r.is_running());
    assert_eq!(run(&mut r), "");
    assert_eq!(r.halt(), Some(Halt::Completed));
}

#[test]
fn test_negative_sleep_is_zero() {
    let mut r = runtime("ldi\n-5\nstoreAtVar\nt\nsleep\nt\ndone");
    match r.execute(5000) {
        Event::Sleep(duration) => assert_eq!(duration, Duration::ZERO),
        event => panic!("expected sleep, got {:?}", event),
    }
}

#[test]
fn test_graphics_commands_queue_in_fifo_order() {
    let mut r = runtime(
        "ldi\n3\nstoreAtVar\nx\nldi\n4\nstoreAtVar\ny\nputPixel\nx\ny\n\
         ldi\n16711680\nstoreAtVar\nc\nsetColor\nc\n\
         ldi\nhello\ndrawText\ndone",
    );
    assert_eq!(run(&mut r), "");
    let graphics = r.graphics_mut();
    assert_eq!(graphics.pop(), Some(GraphicsCommand::PutPixel { x: 3, y: 4 }));
    assert_eq!(graphics.pop(), Some(GraphicsCommand::SetColor(16711680)));
    assert_eq!(
        graphics.pop(),
        Some(GraphicsCommand::DrawText("hello".to_string()))
    );
    assert_eq!(graphics.pop(), None);
}

#[test]
fn test_clg_discards_pending_and_leaves_one_clear() {
    let mut r = runtime(
        "ldi\n1\nstoreAtVar\nx\nputPixel\nx\nx\nputPixel\nx\nx\nclg\ndone",
    );
    assert_eq!(run(&mut r), "");
    let graphics = r.graphics_mut();
    assert_eq!(graphics.len(), 1);
    assert_eq!(graphics.pop(), Some(GraphicsCommand::Clear));
}

#[test]
fn test_interrupt_reports_completed() {
    let mut r = runtime("jmp\n0");
    assert!(matches!(r.execute(100), Event::Running));
    r.interrupt();
    assert!(matches!(r.execute(100), Event::Stopped));
    assert_eq!(r.halt(), Some(Halt::Completed));
}
