use log::{debug, warn};

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_START, GLYPH_HEIGHT};
use crate::error::Error;
use crate::keyboard::{logical_key, Keyboard};
use crate::opcode::Decoded;
use crate::state::State;

// Every operation is responsible for moving the pc on, so that jumps, calls and
// returns can set it outright. Preconditions are checked before anything is written.

/// 0nnn; machine code routine on the original interpreter, ignored here
pub fn sys(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    debug!("ignoring SYS {:#05X} at {:#06X}", op.nnn, state.pc);
    state.next();
    Ok(())
}

/// anything that isn't an instruction
pub fn unknown(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    warn!(
        "unknown instruction {:#06X} at {:#06X}, skipping",
        op.instruction, state.pc
    );
    state.next();
    Ok(())
}

/// clear
pub fn clr(_op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.clear_screen();
    state.next();
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.pc = state.stack.pop().ok_or(Error::StackUnderflow)?;
    state.next();
    Ok(())
}

/// PC = addr
pub fn jump(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.pc = op.nnn;
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.stack.push(state.pc);
    state.pc = op.nnn;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.skip_if(state.vx(op.x) == op.kk);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.skip_if(state.vx(op.x) != op.kk);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.skip_if(state.vx(op.x) == state.vx(op.y));
    Ok(())
}

/// Vx = kk
pub fn load(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.set_vx(op.x, op.kk);
    state.next();
    Ok(())
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.set_vx(op.x, state.vx(op.x).wrapping_add(op.kk));
    state.next();
    Ok(())
}

/// Vx = Vy
pub fn mv(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.set_vx(op.x, state.vx(op.y));
    state.next();
    Ok(())
}

/// Vx |= Vy
pub fn or(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.set_vx(op.x, state.vx(op.x) | state.vx(op.y));
    state.next();
    Ok(())
}

/// Vx &= Vy
pub fn and(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.set_vx(op.x, state.vx(op.x) & state.vx(op.y));
    state.next();
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.set_vx(op.x, state.vx(op.x) ^ state.vx(op.y));
    state.next();
    Ok(())
}

/// Vx += Vy; VF = overflow
pub fn addr(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    let (res, over) = state.vx(op.x).overflowing_add(state.vx(op.y));
    state.set_vx(op.x, res);
    state.set_vx(0xF, over as u8);
    state.next();
    Ok(())
}

/// Vx -= Vy; VF = borrow
/// NB. VF is 1 when the subtraction borrowed, the inverse of the usual "not borrow" flag
pub fn sub(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    let (res, under) = state.vx(op.x).overflowing_sub(state.vx(op.y));
    state.set_vx(op.x, res);
    state.set_vx(0xF, under as u8);
    state.next();
    Ok(())
}

/// Vx = Vy = Vy >> 1; VF = lsb(Vy)
pub fn shr(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    let vy = state.vx(op.y);
    state.set_vx(op.y, vy >> 1);
    state.set_vx(op.x, vy >> 1);
    state.set_vx(0xF, vy & 0x1);
    state.next();
    Ok(())
}

/// Vx = Vy - Vx; VF = borrow
pub fn subn(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    let (res, under) = state.vx(op.y).overflowing_sub(state.vx(op.x));
    state.set_vx(op.x, res);
    state.set_vx(0xF, under as u8);
    state.next();
    Ok(())
}

/// Vx = Vy = Vy << 1; VF = msb(Vy)
pub fn shl(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    let vy = state.vx(op.y);
    state.set_vx(op.y, vy << 1);
    state.set_vx(op.x, vy << 1);
    state.set_vx(0xF, vy >> 7);
    state.next();
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.skip_if(state.vx(op.x) != state.vx(op.y));
    Ok(())
}

/// I = addr
pub fn loadi(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.i.set(op.nnn);
    state.next();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.pc = u16::from(state.vx(0x0)) + op.nnn;
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    let rand_byte: u8 = rand::random();
    state.set_vx(op.x, rand_byte & op.kk);
    state.next();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels were erased
pub fn draw(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    let sprite = state.memory.slice(usize::from(state.i.get()), usize::from(op.n))?;
    let origin_x = usize::from(state.vx(op.x));
    let origin_y = usize::from(state.vx(op.y));
    let mut collision = 0x0;

    for (row, byte) in sprite.iter().enumerate() {
        let y = (origin_y + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let x = (origin_x + bit) % DISPLAY_WIDTH;
            let pixel_value = (byte >> (7 - bit)) & 1;
            collision |= pixel_value & state.frame_buffer[y][x];
            state.frame_buffer[y][x] ^= pixel_value;
        }
    }

    state.set_vx(0xF, collision);
    state.draw_flag = true;
    state.next();
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: &Decoded, state: &mut State, keys: &dyn Keyboard) -> Result<(), Error> {
    state.skip_if(keys.is_key_pressed(logical_key(state.vx(op.x))));
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: &Decoded, state: &mut State, keys: &dyn Keyboard) -> Result<(), Error> {
    state.skip_if(!keys.is_key_pressed(logical_key(state.vx(op.x))));
    Ok(())
}

/// Vx = DT
pub fn moved(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.set_vx(op.x, state.delay_timer);
    state.next();
    Ok(())
}

/// await keypress for Vx
/// The pc stays put; `Chip8` moves it on once the key arrives.
pub fn keyd(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.register_needing_key = Some(op.x);
    Ok(())
}

/// DT = Vx
pub fn loads(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.delay_timer = state.vx(op.x);
    state.next();
    Ok(())
}

/// ST = Vx
pub fn ld(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state.sound_timer = state.vx(op.x);
    state.next();
    Ok(())
}

/// I += Vx
/// Not masked to 12 bits; an I beyond memory faults when something reads through it
pub fn addi(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state
        .i
        .set(state.i.get().wrapping_add(u16::from(state.vx(op.x))));
    state.next();
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the font glyph for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    state
        .i
        .set(FONT_START + u16::from(state.vx(op.x)) * GLYPH_HEIGHT);
    state.next();
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    let vx = state.vx(op.x);
    let bcd = [vx / 100 % 10, vx / 10 % 10, vx % 10];
    state
        .memory
        .slice_mut(usize::from(state.i.get()), bcd.len())?
        .copy_from_slice(&bcd);
    state.next();
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx; I += x + 1
pub fn stor(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    let count = usize::from(op.x) + 1;
    let memory = state.memory.slice_mut(usize::from(state.i.get()), count)?;
    for (byte, register) in memory.iter_mut().zip(state.v.iter()) {
        *byte = register.get();
    }
    state.i.set(state.i.get().wrapping_add(count as u16));
    state.next();
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]; I += x + 1
pub fn read(op: &Decoded, state: &mut State, _keys: &dyn Keyboard) -> Result<(), Error> {
    let count = usize::from(op.x) + 1;
    let memory = state.memory.slice(usize::from(state.i.get()), count)?;
    for (register, &byte) in state.v.iter_mut().zip(memory.iter()) {
        register.set(byte);
    }
    state.i.set(state.i.get().wrapping_add(count as u16));
    state.next();
    Ok(())
}
