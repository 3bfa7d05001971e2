use dev_lib::interrupt::{InterruptError, vector_table_address};
use dev_lib::{InterruptMode, InterruptResponse, IoDevice, NullDevice, Restart, respond};

// Raises a request until the CPU fetches its vector.
struct Timer {
    vector: u8,
    pending: bool,
    acks: usize,
}

impl Timer {
    fn new(vector: u8) -> Self {
        Timer { vector, pending: false, acks: 0 }
    }
}

impl IoDevice for Timer {
    fn io_write(&mut self, _address: u16, _data: u8) {
        self.pending = true;
    }

    fn interrupt_vector(&mut self) -> u8 {
        self.pending = false;
        self.acks += 1;
        self.vector
    }
}

// Just enough CPU to take an interrupt: the I register, the mode, and a page
// of memory for the IM 2 table.
struct TestCpu {
    i: u8,
    mode: InterruptMode,
    mem: Vec<u8>,
}

impl TestCpu {
    fn new(mode: InterruptMode, i: u8) -> Self {
        TestCpu { i, mode, mem: vec![0; 0x10000] }
    }

    fn read_word(&self, addr: u16) -> u16 {
        let lower = self.mem[addr as usize] as u16;
        let upper = self.mem[addr.wrapping_add(1) as usize] as u16;
        lower | (upper << u8::BITS)
    }

    // Returns the new PC.
    fn accept(&mut self, dev: &mut dyn IoDevice) -> u16 {
        match respond(self.mode, dev, self.i) {
            InterruptResponse::Execute(op) => match Restart::decode(op) {
                Ok(rst) => rst.target(),
                Err(e) => panic!("unsupported IM 0 instruction: {e}"),
            },
            InterruptResponse::Call(addr) => addr,
            InterruptResponse::VectorTable(addr) => self.read_word(addr),
        }
    }
}

#[test]
fn im0_rst00() {
    let mut dev = Timer::new(0xc7);
    let resp = respond(InterruptMode::Im0, &mut dev, 0x20);
    assert!(resp.is_execute());
    assert_eq!(resp.unwrap_execute(), 0xc7);
    assert_eq!(resp.restart(), Some(Restart::Rst00));

    let mut cpu = TestCpu::new(InterruptMode::Im0, 0x20);
    assert_eq!(cpu.accept(&mut Timer::new(0xc7)), 0x0000);
}

#[test]
fn im0_default_device() {
    let mut cpu = TestCpu::new(InterruptMode::Im0, 0);
    assert_eq!(cpu.accept(&mut NullDevice), 0x0038);
}

#[test]
fn im0_every_restart() {
    let mut cpu = TestCpu::new(InterruptMode::Im0, 0);
    for (n, op) in (0xc7..=0xffu8).step_by(8).enumerate() {
        assert_eq!(cpu.accept(&mut Timer::new(op)), (n as u16) * 8);
    }
}

#[test]
#[should_panic]
fn im0_non_restart() {
    let mut cpu = TestCpu::new(InterruptMode::Im0, 0);
    // LD A,n
    cpu.accept(&mut Timer::new(0x3e));
}

#[test]
fn im2_vector_table() {
    let mut dev = Timer::new(0x34);
    let resp = respond(InterruptMode::Im2, &mut dev, 0x20);
    assert_eq!(resp, InterruptResponse::VectorTable(0x2034));
    assert_eq!(resp.unwrap_vector_table(), (0x20 << 8) | 0x34);

    let mut cpu = TestCpu::new(InterruptMode::Im2, 0x20);
    cpu.mem[0x2034] = 0x00;
    cpu.mem[0x2035] = 0x81;
    assert_eq!(cpu.accept(&mut Timer::new(0x34)), 0x8100);
}

#[test]
fn im2_default_device() {
    let mut cpu = TestCpu::new(InterruptMode::Im2, 0x39);
    assert_eq!(vector_table_address(0x39, 0xff), 0x39ff);
    cpu.mem[0x39ff] = 0x38;
    cpu.mem[0x3a00] = 0xfe;
    assert_eq!(cpu.accept(&mut NullDevice), 0xfe38);
}

// The device hands back one byte however the CPU will use it.
#[test]
fn same_byte_any_mode() {
    let mut dev = Timer::new(0xd7);
    let im0 = respond(InterruptMode::Im0, &mut dev, 0x40);
    let im2 = respond(InterruptMode::Im2, &mut dev, 0x40);
    assert_eq!(im0, InterruptResponse::Execute(0xd7));
    assert_eq!(im2, InterruptResponse::VectorTable(0x40d7));
    assert_eq!(dev.acks, 2);
}

#[test]
fn im1_skips_acknowledge() {
    let mut dev = Timer::new(0x34);
    dev.io_write(0x0000, 0x00);
    assert!(dev.pending);

    let mut cpu = TestCpu::new(InterruptMode::Im1, 0x20);
    assert_eq!(cpu.accept(&mut dev), 0x0038);
    assert!(dev.pending);
    assert_eq!(dev.acks, 0);
}

#[test]
fn acknowledge_clears_request() {
    let mut dev = Timer::new(0x10);
    dev.io_write(0x0000, 0x00);
    assert!(dev.pending);

    let mut cpu = TestCpu::new(InterruptMode::Im2, 0x80);
    cpu.accept(&mut dev);
    assert!(!dev.pending);
    assert_eq!(dev.acks, 1);
}

#[test]
fn mode_from_byte() {
    assert_eq!(InterruptMode::try_from(2u8), Ok(InterruptMode::Im2));
    assert_eq!(InterruptMode::try_from(7u8), Err(InterruptError::InvalidMode(7)));
    assert_eq!(InterruptMode::default(), InterruptMode::Im0);
}
