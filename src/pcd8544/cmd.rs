pub struct Cmd;
impl Cmd {
    // Basic and extended instruction sets
    pub const FUNCTION_SET: u8 = 0x20;
    pub const DISPLAY_CONTROL: u8 = 0x08;

    // Extended instruction set only (H = 1)
    pub const BIAS_SYSTEM: u8 = 0x10;

    // Addressing, basic instruction set
    pub const SET_BANK: u8 = 0x80;
    pub const SET_SEGMENT: u8 = 0x40;
}

/*
Datasheet instruction summary:
0x20 | PD,V,H   - Function set
0x08 | D,E      - Display control (0x0C = normal mode)
0x10 | BS2..0   - Bias system (extended)
0x80 | Vop      - Set Vop / contrast (extended)
0x40 | Y        - Set Y address of RAM
0x80 | X        - Set X address of RAM
*/
