use std::time::Duration;

use chip8_core::{Chip8, Error, Outcome, Rom, Status};

fn load(program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::new();
    chip8.load(Rom::new("program", program)).unwrap();
    chip8
}

fn cycles(chip8: &mut Chip8, count: usize) {
    for _ in 0..count {
        chip8.cycle().unwrap();
    }
}

#[test]
fn test_glyph_drawn_at_origin() {
    // LD V0, 0x0A; LD F, V0; DRW V1, V1, 5
    let mut chip8 = load(&[0x60, 0x0A, 0xF0, 0x29, 0xD1, 0x15]);
    cycles(&mut chip8, 3);

    let frame = chip8.frame_buffer();
    // glyph A: F0 90 F0 90 90
    assert_eq!(&frame[0][0..4], &[1, 1, 1, 1]);
    assert_eq!(&frame[1][0..4], &[1, 0, 0, 1]);
    assert_eq!(&frame[2][0..4], &[1, 1, 1, 1]);
    assert_eq!(&frame[4][0..4], &[1, 0, 0, 1]);
    assert_eq!(frame[5][0], 0);
    assert_eq!(chip8.registers()[0xF].get(), 0);
}

#[test]
fn test_subroutine_call_and_return() {
    // 0x200: CALL 0x206
    // 0x202: LD V2, 0x02
    // 0x204: JP 0x204
    // 0x206: LD V1, 0x01
    // 0x208: RET
    let mut chip8 = load(&[
        0x22, 0x06, 0x62, 0x02, 0x12, 0x04, 0x61, 0x01, 0x00, 0xEE,
    ]);
    chip8.cycle().unwrap();
    assert_eq!(chip8.stack(), &[0x200]);
    assert_eq!(chip8.program_counter(), 0x206);
    cycles(&mut chip8, 3);
    assert!(chip8.stack().is_empty());
    assert_eq!(chip8.registers()[0x1].get(), 0x01);
    assert_eq!(chip8.registers()[0x2].get(), 0x02);
    assert_eq!(chip8.program_counter(), 0x204);
}

#[test]
fn test_return_with_empty_stack() {
    let mut chip8 = load(&[0x00, 0xEE]);
    assert_eq!(chip8.cycle(), Err(Error::StackUnderflow));
    assert_eq!(chip8.program_counter(), 0x200);
}

#[test]
fn test_countdown_loop() {
    // 0x200: LD V0, 0x05
    // 0x202: ADD V1, 0x02
    // 0x204: ADD V0, 0xFF
    // 0x206: SE V0, 0x00
    // 0x208: JP 0x202
    // 0x20A: JP 0x20A
    let mut chip8 = load(&[
        0x60, 0x05, 0x71, 0x02, 0x70, 0xFF, 0x30, 0x00, 0x12, 0x02, 0x12, 0x0A,
    ]);
    cycles(&mut chip8, 100);
    assert_eq!(chip8.registers()[0x0].get(), 0);
    assert_eq!(chip8.registers()[0x1].get(), 10);
    assert_eq!(chip8.program_counter(), 0x20A);
}

#[test]
fn test_bcd_then_load_back() {
    // LD V0, 0xFE; LD I, 0x300; LD B, V0; LD V2, [I]
    let mut chip8 = load(&[0x60, 0xFE, 0xA3, 0x00, 0xF0, 0x33, 0xF2, 0x65]);
    cycles(&mut chip8, 4);
    let v: Vec<u8> = chip8.registers()[0..3].iter().map(|r| r.get()).collect();
    assert_eq!(v, vec![2, 5, 4]);
    assert_eq!(chip8.index_register().get(), 0x303);
    assert_eq!(chip8.memory().slice(0x300, 3), Ok(&[2, 5, 4][..]));
}

#[test]
fn test_key_wait_through_run() {
    // LD V3, K; JP 0x202
    let mut chip8 = load(&[0xF3, 0x0A, 0x12, 0x02]);
    chip8.run().unwrap();
    chip8.advance(Duration::from_millis(100)).unwrap();
    assert_eq!(chip8.status(), Status::HaltedOnKey { register: 0x3 });
    assert_eq!(chip8.program_counter(), 0x200);

    chip8.key_press(0xB);
    chip8.advance(Duration::from_millis(100)).unwrap();
    assert_eq!(chip8.status(), Status::Running);
    assert_eq!(chip8.registers()[0x3].get(), 0xB);
    assert_eq!(chip8.program_counter(), 0x202);
}

#[test]
fn test_skip_on_held_key() {
    // LD V0, 0x05; SKP V0; LD V1, 0x01; LD V2, 0x02
    let program = [0x60, 0x05, 0xE0, 0x9E, 0x61, 0x01, 0x62, 0x02];

    let mut chip8 = load(&program);
    chip8.key_press(0x5);
    cycles(&mut chip8, 3);
    assert_eq!(chip8.registers()[0x1].get(), 0x00);
    assert_eq!(chip8.registers()[0x2].get(), 0x02);

    let mut chip8 = load(&program);
    cycles(&mut chip8, 3);
    assert_eq!(chip8.registers()[0x1].get(), 0x01);
}

#[test]
fn test_sound_follows_timer() {
    // LD V0, 0x01; LD ST, V0; JP 0x204
    let mut chip8 = load(&[0x60, 0x01, 0xF0, 0x18, 0x12, 0x04]);
    cycles(&mut chip8, 2);
    assert!(chip8.sound_active());
    cycles(&mut chip8, 7);
    assert!(!chip8.sound_active());
}

#[test]
fn test_unknown_opcode_does_not_stop_program() {
    // DW 0xFFFF; LD V0, 0x01
    let mut chip8 = load(&[0xFF, 0xFF, 0x60, 0x01]);
    assert!(matches!(chip8.cycle(), Ok(Outcome::Ignored(_))));
    assert!(matches!(chip8.cycle(), Ok(Outcome::Executed(_))));
    assert_eq!(chip8.registers()[0x0].get(), 0x01);
}

#[test]
fn test_draw_past_memory_is_atomic() {
    // LD I, 0xFFE; DRW V0, V0, 5
    let mut chip8 = load(&[0xAF, 0xFE, 0xD0, 0x05]);
    chip8.cycle().unwrap();
    assert_eq!(chip8.cycle(), Err(Error::OutOfBounds { address: 0xFFF }));
    assert_eq!(chip8.program_counter(), 0x202);
    assert!(chip8.frame_buffer().iter().flatten().all(|&p| p == 0));
}

#[test]
fn test_failed_return_keeps_register_highlights() {
    // LD V1, 0x01; RET
    let mut chip8 = load(&[0x61, 0x01, 0x00, 0xEE]);
    chip8.cycle().unwrap();
    let before = chip8.registers().to_vec();
    assert!(before[0x1].updated());

    assert_eq!(chip8.cycle(), Err(Error::StackUnderflow));
    assert_eq!(chip8.registers(), &before[..]);
    assert!(chip8.registers()[0x1].updated());
}

#[test]
fn test_running_off_the_end_of_memory() {
    let mut chip8 = load(&[]);
    chip8.run().unwrap();
    // zeroed memory is all SYS, so the pc walks to the end
    let result = chip8.advance(Duration::from_secs(10));
    assert_eq!(result, Err(Error::OutOfBounds { address: 0xFFF }));
    assert_eq!(chip8.program_counter(), 0xFFE);
    assert!(!chip8.is_running());
}

#[test]
fn test_rom_too_large() {
    let mut chip8 = Chip8::new();
    let result = chip8.load(Rom::new("big", vec![0; 0xE00]));
    assert_eq!(
        result,
        Err(Error::RomTooLarge {
            size: 0xE00,
            capacity: 0xDFF
        })
    );
    assert_eq!(chip8.status(), Status::Unloaded);
}
