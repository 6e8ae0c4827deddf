use bytes::BufMut;

/// 7-bit groups needed for any `u32`.
pub const MAX_UVARINT_BYTES: usize = 5;

pub trait PutVarint {
    fn put_uvarint(&mut self, num: u32);
}

impl<B: BufMut + ?Sized> PutVarint for B {
    fn put_uvarint(&mut self, mut num: u32) {
        while (num & !0x7F) != 0 {
            self.put_u8(((num & 0x7F) | 0x80) as u8);
            num >>= 7;
        }
        self.put_u8(num as u8);
    }
}
