// `Unmarshal`/`MergeFrom` for every message plus the shared `skip_value`
// helper, in the shape `plugins/unmarshal.rs` emits — the content of what
// the CLI would write to `sample.unmarshal.rs`.

impl TestMessage {
    pub fn Unmarshal(&mut self, data: &[u8]) -> Result<(), Error> {
        let mut cursor = data;
        self.MergeFrom(&mut cursor)
    }

    pub fn MergeFrom(&mut self, buf: &mut impl Buf) -> Result<(), Error> {
        while buf.has_remaining() {
            let key = pb_wire::decode_varint(buf)?;
            let (tag, wire_type) = pb_wire::split_tag_key(key)?;
            match tag {
                1 => {
                    if wire_type != WireType::Varint {
                        return Err(Error::WrongWireType);
                    }
                    let raw = pb_wire::decode_varint(buf)?;
                    self.field1 = raw as i64;
                    self.xxx_IsField1Set = true;
                }
                2 => {
                    if wire_type != WireType::Len {
                        return Err(Error::WrongWireType);
                    }
                    let len = pb_wire::decode_varint(buf)? as usize;
                    if buf.remaining() < len {
                        return Err(Error::UnexpectedEof);
                    }
                    let mut raw = vec![0u8; len];
                    buf.copy_to_slice(&mut raw);
                    self.field2 = String::from_utf8_lossy(&raw).into_owned();
                    self.xxx_IsField2Set = true;
                }
                _ => {
                    let mut key_bytes = Vec::new();
                    pb_wire::encode_varint(key, &mut key_bytes);
                    self.xxx_unrecognized.extend_from_slice(&key_bytes);
                    skip_value(wire_type, buf, &mut self.xxx_unrecognized)?;
                }
            }
        }
        Ok(())
    }
}

impl PackedInts {
    pub fn Unmarshal(&mut self, data: &[u8]) -> Result<(), Error> {
        let mut cursor = data;
        self.MergeFrom(&mut cursor)
    }

    pub fn MergeFrom(&mut self, buf: &mut impl Buf) -> Result<(), Error> {
        while buf.has_remaining() {
            let key = pb_wire::decode_varint(buf)?;
            let (tag, wire_type) = pb_wire::split_tag_key(key)?;
            match tag {
                1 => match wire_type {
                    WireType::Varint => {
                        let raw = pb_wire::decode_varint(buf)?;
                        pb_wire::grow_to_fit(&mut self.field1, self.xxx_LenField1 + 1);
                        self.field1[self.xxx_LenField1] = raw as i32;
                        self.xxx_LenField1 += 1;
                    }
                    WireType::Len => {
                        let len = pb_wire::decode_varint(buf)? as usize;
                        if buf.remaining() < len {
                            return Err(Error::UnexpectedEof);
                        }
                        let mut packed = buf.take(len);
                        while packed.has_remaining() {
                            let raw = pb_wire::decode_varint(&mut packed)?;
                            pb_wire::grow_to_fit(&mut self.field1, self.xxx_LenField1 + 1);
                            self.field1[self.xxx_LenField1] = raw as i32;
                            self.xxx_LenField1 += 1;
                        }
                    }
                    _ => return Err(Error::WrongWireType),
                },
                _ => {
                    let mut key_bytes = Vec::new();
                    pb_wire::encode_varint(key, &mut key_bytes);
                    self.xxx_unrecognized.extend_from_slice(&key_bytes);
                    skip_value(wire_type, buf, &mut self.xxx_unrecognized)?;
                }
            }
        }
        Ok(())
    }
}

impl UnpackedInts {
    pub fn Unmarshal(&mut self, data: &[u8]) -> Result<(), Error> {
        let mut cursor = data;
        self.MergeFrom(&mut cursor)
    }

    pub fn MergeFrom(&mut self, buf: &mut impl Buf) -> Result<(), Error> {
        while buf.has_remaining() {
            let key = pb_wire::decode_varint(buf)?;
            let (tag, wire_type) = pb_wire::split_tag_key(key)?;
            match tag {
                1 => match wire_type {
                    WireType::Varint => {
                        let raw = pb_wire::decode_varint(buf)?;
                        pb_wire::grow_to_fit(&mut self.field1, self.xxx_LenField1 + 1);
                        self.field1[self.xxx_LenField1] = raw as i32;
                        self.xxx_LenField1 += 1;
                    }
                    WireType::Len => {
                        let len = pb_wire::decode_varint(buf)? as usize;
                        if buf.remaining() < len {
                            return Err(Error::UnexpectedEof);
                        }
                        let mut packed = buf.take(len);
                        while packed.has_remaining() {
                            let raw = pb_wire::decode_varint(&mut packed)?;
                            pb_wire::grow_to_fit(&mut self.field1, self.xxx_LenField1 + 1);
                            self.field1[self.xxx_LenField1] = raw as i32;
                            self.xxx_LenField1 += 1;
                        }
                    }
                    _ => return Err(Error::WrongWireType),
                },
                _ => {
                    let mut key_bytes = Vec::new();
                    pb_wire::encode_varint(key, &mut key_bytes);
                    self.xxx_unrecognized.extend_from_slice(&key_bytes);
                    skip_value(wire_type, buf, &mut self.xxx_unrecognized)?;
                }
            }
        }
        Ok(())
    }
}

impl NestedInner {
    pub fn MergeFrom(&mut self, buf: &mut impl Buf) -> Result<(), Error> {
        while buf.has_remaining() {
            let key = pb_wire::decode_varint(buf)?;
            let (tag, wire_type) = pb_wire::split_tag_key(key)?;
            match tag {
                1 => {
                    if wire_type != WireType::Varint {
                        return Err(Error::WrongWireType);
                    }
                    let raw = pb_wire::decode_varint(buf)?;
                    self.x = raw as i32;
                    self.xxx_IsXSet = true;
                }
                _ => {
                    let mut key_bytes = Vec::new();
                    pb_wire::encode_varint(key, &mut key_bytes);
                    self.xxx_unrecognized.extend_from_slice(&key_bytes);
                    skip_value(wire_type, buf, &mut self.xxx_unrecognized)?;
                }
            }
        }
        Ok(())
    }
}

impl NestedOuter {
    pub fn Unmarshal(&mut self, data: &[u8]) -> Result<(), Error> {
        let mut cursor = data;
        self.MergeFrom(&mut cursor)
    }

    pub fn MergeFrom(&mut self, buf: &mut impl Buf) -> Result<(), Error> {
        while buf.has_remaining() {
            let key = pb_wire::decode_varint(buf)?;
            let (tag, wire_type) = pb_wire::split_tag_key(key)?;
            match tag {
                3 => {
                    if wire_type != WireType::Len {
                        return Err(Error::WrongWireType);
                    }
                    let len = pb_wire::decode_varint(buf)? as usize;
                    if buf.remaining() < len {
                        return Err(Error::UnexpectedEof);
                    }
                    self.xxx_IsInnerSet = true;
                    let mut child_buf = buf.take(len);
                    self.inner
                        .MergeFrom(&mut child_buf)
                        .map_err(Error::into_child)?;
                }
                _ => {
                    let mut key_bytes = Vec::new();
                    pb_wire::encode_varint(key, &mut key_bytes);
                    self.xxx_unrecognized.extend_from_slice(&key_bytes);
                    skip_value(wire_type, buf, &mut self.xxx_unrecognized)?;
                }
            }
        }
        Ok(())
    }
}

/// Re-encodes one unknown field's value into `out`, the way the
/// generator's `skip_value_{suffix}` helper does for every message
/// (spec §4.6, unknown-field preservation).
fn skip_value(wire_type: WireType, buf: &mut impl Buf, out: &mut Vec<u8>) -> Result<(), Error> {
    match wire_type {
        WireType::Varint => {
            let value = pb_wire::decode_varint(buf)?;
            pb_wire::encode_varint(value, out);
        }
        WireType::Fixed32 => {
            let value = pb_wire::decode_fixed32(buf)?;
            pb_wire::encode_fixed32(value, out);
        }
        WireType::Fixed64 => {
            let value = pb_wire::decode_fixed64(buf)?;
            pb_wire::encode_fixed64(value, out);
        }
        WireType::Len => {
            let len = pb_wire::decode_varint(buf)? as usize;
            pb_wire::encode_varint(len as u64, out);
            if buf.remaining() < len {
                return Err(Error::UnexpectedEof);
            }
            let mut payload = vec![0u8; len];
            buf.copy_to_slice(&mut payload);
            out.extend_from_slice(&payload);
        }
    }
    Ok(())
}
