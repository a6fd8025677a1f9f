// `Size`/`Marshal`/`MarshalTo`/`MarshalToUsingCachedSize` for every message,
// in the shape `plugins/marshal.rs` emits — the content of what the CLI
// would write to `sample.marshal.rs`. No `use` brings the structs above
// into scope here; `include!` in `lib.rs` is what puts this in the same
// module as `accessor.rs`, matching how the real per-file outputs only
// compile together once something glues them into one module.

impl TestMessage {
    pub fn Size(&self) -> usize {
        let mut n = 0usize;
        if self.xxx_IsField1Set {
            n += pb_wire::encoded_len_varint(pb_wire::tag_key(1, WireType::Varint));
            n += pb_wire::encoded_len_varint(self.field1 as u64);
        }
        if self.xxx_IsField2Set {
            n += pb_wire::encoded_len_varint(pb_wire::tag_key(2, WireType::Len));
            n += pb_wire::encoded_len_varint(self.field2.len() as u64) + self.field2.len();
        }
        n += self.xxx_unrecognized.len();
        self.xxx_size_cached.set(n as u32);
        n
    }

    pub fn Marshal(&self) -> Result<Vec<u8>, Error> {
        let size = self.Size();
        let mut buf = vec![0u8; size];
        self.MarshalToUsingCachedSize(&mut buf)?;
        Ok(buf)
    }

    pub fn MarshalTo(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let size = self.Size();
        if buf.len() < size {
            return Err(Error::BufferTooSmall);
        }
        self.MarshalToUsingCachedSize(buf)
    }

    pub fn MarshalToUsingCachedSize(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let size = self.xxx_size_cached.get() as usize;
        if buf.len() < size {
            return Err(Error::BufferTooSmall);
        }
        let mut cursor: &mut [u8] = &mut buf[..size];
        if self.xxx_IsField1Set {
            pb_wire::encode_varint(pb_wire::tag_key(1, WireType::Varint), &mut cursor);
            pb_wire::encode_varint(self.field1 as u64, &mut cursor);
        }
        if self.xxx_IsField2Set {
            pb_wire::encode_varint(pb_wire::tag_key(2, WireType::Len), &mut cursor);
            pb_wire::encode_varint(self.field2.len() as u64, &mut cursor);
            cursor.put_slice(self.field2.as_bytes());
        }
        cursor.put_slice(&self.xxx_unrecognized);
        Ok(size)
    }
}

impl PackedInts {
    pub fn Size(&self) -> usize {
        let mut n = 0usize;
        if self.xxx_LenField1 > 0 {
            let mut payload_len = 0usize;
            for value in &self.field1[..self.xxx_LenField1] {
                payload_len += pb_wire::encoded_len_varint(*value as u64);
            }
            n += pb_wire::encoded_len_varint(pb_wire::tag_key(1, WireType::Len));
            n += pb_wire::encoded_len_varint(payload_len as u64);
            n += payload_len;
        }
        n += self.xxx_unrecognized.len();
        self.xxx_size_cached.set(n as u32);
        n
    }

    pub fn Marshal(&self) -> Result<Vec<u8>, Error> {
        let size = self.Size();
        let mut buf = vec![0u8; size];
        self.MarshalToUsingCachedSize(&mut buf)?;
        Ok(buf)
    }

    pub fn MarshalTo(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let size = self.Size();
        if buf.len() < size {
            return Err(Error::BufferTooSmall);
        }
        self.MarshalToUsingCachedSize(buf)
    }

    pub fn MarshalToUsingCachedSize(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let size = self.xxx_size_cached.get() as usize;
        if buf.len() < size {
            return Err(Error::BufferTooSmall);
        }
        let mut cursor: &mut [u8] = &mut buf[..size];
        if self.xxx_LenField1 > 0 {
            let mut payload_len = 0usize;
            for value in &self.field1[..self.xxx_LenField1] {
                payload_len += pb_wire::encoded_len_varint(*value as u64);
            }
            pb_wire::encode_varint(pb_wire::tag_key(1, WireType::Len), &mut cursor);
            pb_wire::encode_varint(payload_len as u64, &mut cursor);
            for value in &self.field1[..self.xxx_LenField1] {
                pb_wire::encode_varint(*value as u64, &mut cursor);
            }
        }
        cursor.put_slice(&self.xxx_unrecognized);
        Ok(size)
    }
}

impl UnpackedInts {
    pub fn Size(&self) -> usize {
        let mut n = 0usize;
        for value in &self.field1[..self.xxx_LenField1] {
            n += pb_wire::encoded_len_varint(pb_wire::tag_key(1, WireType::Varint));
            n += pb_wire::encoded_len_varint(*value as u64);
        }
        n += self.xxx_unrecognized.len();
        self.xxx_size_cached.set(n as u32);
        n
    }

    pub fn Marshal(&self) -> Result<Vec<u8>, Error> {
        let size = self.Size();
        let mut buf = vec![0u8; size];
        self.MarshalToUsingCachedSize(&mut buf)?;
        Ok(buf)
    }

    pub fn MarshalToUsingCachedSize(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let size = self.xxx_size_cached.get() as usize;
        if buf.len() < size {
            return Err(Error::BufferTooSmall);
        }
        let mut cursor: &mut [u8] = &mut buf[..size];
        for value in &self.field1[..self.xxx_LenField1] {
            pb_wire::encode_varint(pb_wire::tag_key(1, WireType::Varint), &mut cursor);
            pb_wire::encode_varint(*value as u64, &mut cursor);
        }
        cursor.put_slice(&self.xxx_unrecognized);
        Ok(size)
    }
}

impl NestedInner {
    pub fn Size(&self) -> usize {
        let mut n = 0usize;
        if self.xxx_IsXSet {
            n += pb_wire::encoded_len_varint(pb_wire::tag_key(1, WireType::Varint));
            n += pb_wire::encoded_len_varint(self.x as u64);
        }
        n += self.xxx_unrecognized.len();
        self.xxx_size_cached.set(n as u32);
        n
    }

    pub fn MarshalToUsingCachedSize(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let size = self.xxx_size_cached.get() as usize;
        if buf.len() < size {
            return Err(Error::BufferTooSmall);
        }
        let mut cursor: &mut [u8] = &mut buf[..size];
        if self.xxx_IsXSet {
            pb_wire::encode_varint(pb_wire::tag_key(1, WireType::Varint), &mut cursor);
            pb_wire::encode_varint(self.x as u64, &mut cursor);
        }
        cursor.put_slice(&self.xxx_unrecognized);
        Ok(size)
    }
}

impl NestedOuter {
    pub fn Size(&self) -> usize {
        let mut n = 0usize;
        if self.xxx_IsInnerSet {
            n += pb_wire::encoded_len_varint(pb_wire::tag_key(3, WireType::Len));
            let child_len = self.inner.Size();
            n += pb_wire::encoded_len_varint(child_len as u64);
            n += child_len;
        }
        n += self.xxx_unrecognized.len();
        self.xxx_size_cached.set(n as u32);
        n
    }

    pub fn Marshal(&self) -> Result<Vec<u8>, Error> {
        let size = self.Size();
        let mut buf = vec![0u8; size];
        self.MarshalToUsingCachedSize(&mut buf)?;
        Ok(buf)
    }

    pub fn MarshalToUsingCachedSize(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let size = self.xxx_size_cached.get() as usize;
        if buf.len() < size {
            return Err(Error::BufferTooSmall);
        }
        let mut cursor: &mut [u8] = &mut buf[..size];
        if self.xxx_IsInnerSet {
            let child_len = self.inner.Size();
            pb_wire::encode_varint(pb_wire::tag_key(3, WireType::Len), &mut cursor);
            pb_wire::encode_varint(child_len as u64, &mut cursor);
            let (child_buf, rest) = cursor.split_at_mut(child_len);
            self.inner
                .MarshalToUsingCachedSize(child_buf)
                .map_err(Error::into_child)?;
            cursor = rest;
        }
        cursor.put_slice(&self.xxx_unrecognized);
        Ok(size)
    }
}
