/// Display names of the general purpose registers
pub const V_NAMES: [&str; 16] = [
    "V0", "V1", "V2", "V3", "V4", "V5", "V6", "V7", "V8", "V9", "VA", "VB", "VC", "VD", "VE", "VF",
];

/// Display name of the index register
pub const I_NAME: &str = "I";

/// # Register
/// A named storage cell that remembers whether its last write changed it.
///
/// The general purpose registers are `Register<u8>`, so every write is already
/// reduced to 0..=255. The index register is a `Register<u16>` and is never masked.
///
/// `updated` is cleared by the CPU at the start of every cycle so that presentation
/// layers can highlight just the registers the last instruction changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register<T> {
    name: &'static str,
    value: T,
    updated: bool,
}

impl<T: Copy + Default + PartialEq> Register<T> {
    pub fn new(name: &'static str) -> Self {
        Register {
            name,
            value: T::default(),
            updated: false,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn get(&self) -> T {
        self.value
    }

    /// Stores `value`; `updated` is set iff it differs from the previous value
    pub fn set(&mut self, value: T) {
        self.updated = value != self.value;
        self.value = value;
    }

    pub fn updated(&self) -> bool {
        self.updated
    }

    pub fn clear_updated(&mut self) {
        self.updated = false;
    }
}

/// Builds V0..VF, all zeroed
pub fn general_purpose() -> [Register<u8>; 16] {
    let mut registers = [Register::new(V_NAMES[0]); 16];
    for (register, name) in registers.iter_mut().zip(V_NAMES.iter().copied()) {
        *register = Register::new(name);
    }
    registers
}
