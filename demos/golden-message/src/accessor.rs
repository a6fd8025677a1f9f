// Struct definitions plus the Has/Set/Clear/Mutate/Add/Get/...Size surface
// for every message, in the shape `plugins/accessor.rs` emits. This is the
// content of what the CLI would write to `sample.accessor.rs`; it is
// `include!`d by `lib.rs` rather than brought in with `use`, the same way a
// build script gluing `protoc-gen-wirecodec`'s per-plugin outputs together
// would `include!` each one into one module instead of treating them as
// separate crates.

/// `{ field1: int64 = 150, field2: string = "testing" }` (spec §8
/// scenario 1).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TestMessage {
    pub(crate) field1: i64,
    pub(crate) xxx_IsField1Set: bool,
    pub(crate) field2: String,
    pub(crate) xxx_IsField2Set: bool,
    pub(crate) xxx_size_cached: Cell<u32>,
    pub(crate) xxx_unrecognized: Vec<u8>,
}

impl TestMessage {
    pub fn HasField1(&self) -> bool {
        self.xxx_IsField1Set
    }

    pub fn SetField1(&mut self, value: i64) -> Result<(), Error> {
        self.field1 = value;
        self.xxx_IsField1Set = true;
        Ok(())
    }

    pub fn ClearField1(&mut self) {
        self.field1 = 0;
        self.xxx_IsField1Set = false;
    }

    pub fn HasField2(&self) -> bool {
        self.xxx_IsField2Set
    }

    pub fn SetField2(&mut self, value: String) -> Result<(), Error> {
        self.field2 = value;
        self.xxx_IsField2Set = true;
        Ok(())
    }

    pub fn ClearField2(&mut self) {
        self.field2.clear();
        self.xxx_IsField2Set = false;
    }

    pub fn Clear(&mut self) {
        self.ClearField1();
        self.ClearField2();
        self.xxx_unrecognized.clear();
    }

    pub fn SizeCached(&self) -> usize {
        self.xxx_size_cached.get() as usize
    }
}

/// `{ field1: [1, 2, 150] }` at tag 1, packed (spec §8 scenario 2).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackedInts {
    pub(crate) field1: Vec<i32>,
    pub(crate) xxx_LenField1: usize,
    pub(crate) xxx_size_cached: Cell<u32>,
    pub(crate) xxx_unrecognized: Vec<u8>,
}

impl PackedInts {
    pub fn Field1Size(&self) -> usize {
        self.xxx_LenField1
    }

    pub fn AddField1(&mut self, value: i32) -> Result<(), Error> {
        pb_wire::grow_to_fit(&mut self.field1, self.xxx_LenField1 + 1);
        self.field1[self.xxx_LenField1] = value;
        self.xxx_LenField1 += 1;
        Ok(())
    }

    pub fn GetField1(&self, index: usize) -> Result<i32, Error> {
        if index >= self.xxx_LenField1 {
            return Err(Error::IndexOutOfBounds);
        }
        Ok(self.field1[index])
    }

    pub fn ClearField1(&mut self) {
        self.xxx_LenField1 = 0;
    }

    pub fn Clear(&mut self) {
        self.ClearField1();
        self.xxx_unrecognized.clear();
    }

    pub fn SizeCached(&self) -> usize {
        self.xxx_size_cached.get() as usize
    }
}

/// Same field, unpacked (spec §8 scenario 3): every element gets its own
/// tag-key occurrence instead of sharing one `LEN` envelope.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnpackedInts {
    pub(crate) field1: Vec<i32>,
    pub(crate) xxx_LenField1: usize,
    pub(crate) xxx_size_cached: Cell<u32>,
    pub(crate) xxx_unrecognized: Vec<u8>,
}

impl UnpackedInts {
    pub fn Field1Size(&self) -> usize {
        self.xxx_LenField1
    }

    pub fn AddField1(&mut self, value: i32) -> Result<(), Error> {
        pb_wire::grow_to_fit(&mut self.field1, self.xxx_LenField1 + 1);
        self.field1[self.xxx_LenField1] = value;
        self.xxx_LenField1 += 1;
        Ok(())
    }

    pub fn GetField1(&self, index: usize) -> Result<i32, Error> {
        if index >= self.xxx_LenField1 {
            return Err(Error::IndexOutOfBounds);
        }
        Ok(self.field1[index])
    }

    pub fn ClearField1(&mut self) {
        self.xxx_LenField1 = 0;
    }

    pub fn SizeCached(&self) -> usize {
        self.xxx_size_cached.get() as usize
    }
}

/// `{ x: int32 }`, tag 1 — the child of [`NestedOuter`] (spec §8 scenario
/// 4).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NestedInner {
    pub(crate) x: i32,
    pub(crate) xxx_IsXSet: bool,
    pub(crate) xxx_size_cached: Cell<u32>,
    pub(crate) xxx_unrecognized: Vec<u8>,
}

impl NestedInner {
    pub fn HasX(&self) -> bool {
        self.xxx_IsXSet
    }

    pub fn SetX(&mut self, value: i32) -> Result<(), Error> {
        self.x = value;
        self.xxx_IsXSet = true;
        Ok(())
    }

    pub fn ClearX(&mut self) {
        self.x = 0;
        self.xxx_IsXSet = false;
    }

    pub fn Clear(&mut self) {
        self.ClearX();
        self.xxx_unrecognized.clear();
    }

    pub fn SizeCached(&self) -> usize {
        self.xxx_size_cached.get() as usize
    }
}

/// `{ inner: { x: 42 } }` with `inner` at tag 3 (spec §8 scenario 4).
/// `inner` is `Option`-free here: `NestedOuter`/`NestedInner` don't
/// cycle, so `accessor`'s storage never needs the `xxx_Is...Set`-gated
/// `Option` wrapper the face/get emitters surface — it's plain presence
/// via the same companion boolean every singular field gets.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NestedOuter {
    pub(crate) inner: NestedInner,
    pub(crate) xxx_IsInnerSet: bool,
    pub(crate) xxx_size_cached: Cell<u32>,
    pub(crate) xxx_unrecognized: Vec<u8>,
}

impl NestedOuter {
    pub fn HasInner(&self) -> bool {
        self.xxx_IsInnerSet
    }

    pub fn MutateInner(&mut self) -> Result<&mut NestedInner, Error> {
        self.xxx_IsInnerSet = true;
        Ok(&mut self.inner)
    }

    pub fn ClearInner(&mut self) {
        self.inner.Clear();
        self.xxx_IsInnerSet = false;
    }

    pub fn Clear(&mut self) {
        self.ClearInner();
        self.xxx_unrecognized.clear();
    }

    pub fn SizeCached(&self) -> usize {
        self.xxx_size_cached.get() as usize
    }
}
