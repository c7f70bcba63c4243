// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `actions` module decodes AVM1 action records and the clip action
//! lists attached to display-list objects.
//!
//! An action record is a one-byte opcode; opcodes at or above 0x80 carry a
//! 16-bit payload length. Unknown opcodes are skipped over by their declared
//! length and preserved as [`Action::Unknown`] entries. Function bodies are
//! captured as raw byte blocks; they are themselves action streams and can
//! be fed back through [`read_action_list`].

use flare_core::errors::{decode_error, unknown_discriminator_error, Result};
use flare_core::io::BitReader;

use bitflags::bitflags;
use phf::phf_map;

use crate::records::ClipEventFlags;

/// The header of a single action record.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActionHeader {
    pub code: u8,
    pub length: u16,
    /// Byte position of the payload.
    pub data_pos: usize,
}

impl ActionHeader {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let code = reader.read_u8()?;
        let length = if code >= 0x80 { reader.read_u16()? } else { 0 };

        Ok(ActionHeader { code, length, data_pos: reader.byte_position() })
    }
}

/// A typed value pushed onto the AVM1 stack.
#[derive(Clone, Debug, PartialEq)]
pub enum PushValue {
    Str(String),
    Float(f32),
    Null,
    Undefined,
    Register(u8),
    Bool(bool),
    Double(f64),
    Int(u32),
    Constant8(u8),
    Constant16(u16),
}

impl PushValue {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let kind = reader.read_u8()?;

        let value = match kind {
            0 => PushValue::Str(reader.read_nul_string()?),
            1 => PushValue::Float(reader.read_f32()?),
            2 => PushValue::Null,
            3 => PushValue::Undefined,
            4 => PushValue::Register(reader.read_u8()?),
            5 => PushValue::Bool(reader.read_bool()?),
            6 => PushValue::Double(reader.read_f64()?),
            7 => PushValue::Int(reader.read_u32()?),
            8 => PushValue::Constant8(reader.read_u8()?),
            9 => PushValue::Constant16(reader.read_u16()?),
            _ => return unknown_discriminator_error("push value type", u32::from(kind)),
        };

        Ok(value)
    }
}

/// The submit method of a GetUrl2 action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SendVarsMethod {
    None,
    Get,
    Post,
}

impl SendVarsMethod {
    fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            0 => Ok(SendVarsMethod::None),
            1 => Ok(SendVarsMethod::Get),
            2 => Ok(SendVarsMethod::Post),
            _ => unknown_discriminator_error("send vars method", bits),
        }
    }
}

/// A function declaration. The body is a nested action stream.
#[derive(Clone, Debug, PartialEq)]
pub struct DefineFunction {
    pub name: String,
    pub params: Vec<String>,
    pub body: Box<[u8]>,
}

bitflags! {
    /// Register preload and suppression flags of a DefineFunction2 action,
    /// in wire bit order.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct FunctionFlags: u16 {
        const PRELOAD_PARENT     = 1 << 15;
        const PRELOAD_ROOT       = 1 << 14;
        const SUPPRESS_SUPER     = 1 << 13;
        const PRELOAD_SUPER      = 1 << 12;
        const SUPPRESS_ARGUMENTS = 1 << 11;
        const PRELOAD_ARGUMENTS  = 1 << 10;
        const SUPPRESS_THIS      = 1 << 9;
        const PRELOAD_THIS       = 1 << 8;
        // 7 reserved bits.
        const PRELOAD_GLOBAL     = 1 << 0;
    }
}

/// A function parameter bound to a register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterParam {
    pub register: u8,
    pub name: String,
}

/// A function declaration with register bindings.
#[derive(Clone, Debug, PartialEq)]
pub struct DefineFunction2 {
    pub name: String,
    pub register_count: u8,
    pub flags: FunctionFlags,
    pub params: Vec<RegisterParam>,
    pub body: Box<[u8]>,
}

/// The binding of a caught value: either a register or a named variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatchTarget {
    Register(u8),
    Variable(String),
}

/// A try/catch/finally block. The three bodies are nested action streams.
#[derive(Clone, Debug, PartialEq)]
pub struct TryAction {
    pub catch_target: CatchTarget,
    pub try_body: Box<[u8]>,
    pub catch_body: Box<[u8]>,
    pub finally_body: Box<[u8]>,
}

/// Action types, keyed by their opcodes. The end-of-actions marker (opcode
/// 0) is not an action and is handled by [`read_action_list`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionType {
    NextFrame,
    PreviousFrame,
    Play,
    Stop,
    ToggleQuality,
    StopSounds,
    Add,
    Subtract,
    Multiply,
    Divide,
    Equals,
    Less,
    And,
    Or,
    Not,
    StringEquals,
    StringLength,
    StringExtract,
    Pop,
    ToInteger,
    GetVariable,
    SetVariable,
    SetTarget2,
    StringAdd,
    GetProperty,
    SetProperty,
    CloneSprite,
    RemoveSprite,
    Trace,
    StartDrag,
    EndDrag,
    StringLess,
    Throw,
    CastOp,
    ImplementsOp,
    RandomNumber,
    MbStringLength,
    CharToAscii,
    AsciiToChar,
    GetTime,
    MbStringExtract,
    MbCharToAscii,
    MbAsciiToChar,
    Delete,
    Delete2,
    DefineLocal,
    CallFunction,
    Return,
    Modulo,
    NewObject,
    DefineLocal2,
    InitArray,
    InitObject,
    TypeOf,
    TargetPath,
    Enumerate,
    Add2,
    Less2,
    Equals2,
    ToNumber,
    ToString,
    PushDuplicate,
    StackSwap,
    GetMember,
    SetMember,
    Increment,
    Decrement,
    CallMethod,
    NewMethod,
    InstanceOf,
    Enumerate2,
    BitAnd,
    BitOr,
    BitXor,
    BitLShift,
    BitRShift,
    BitUrShift,
    StrictEquals,
    Greater,
    StringGreater,
    Extends,
    GotoFrame,
    GetUrl,
    StoreRegister,
    ConstantPool,
    WaitForFrame,
    SetTarget,
    GotoLabel,
    WaitForFrame2,
    DefineFunction2,
    Try,
    With,
    Push,
    Jump,
    GetUrl2,
    DefineFunction,
    If,
    Call,
    GotoFrame2,
}

/// The action registry: decoder dispatch is keyed on the opcode. The map is
/// built at compile time and is read-only during decoding.
static ACTION_TYPES: phf::Map<u8, ActionType> = phf_map! {
    0x04u8 => ActionType::NextFrame,
    0x05u8 => ActionType::PreviousFrame,
    0x06u8 => ActionType::Play,
    0x07u8 => ActionType::Stop,
    0x08u8 => ActionType::ToggleQuality,
    0x09u8 => ActionType::StopSounds,
    0x0au8 => ActionType::Add,
    0x0bu8 => ActionType::Subtract,
    0x0cu8 => ActionType::Multiply,
    0x0du8 => ActionType::Divide,
    0x0eu8 => ActionType::Equals,
    0x0fu8 => ActionType::Less,
    0x10u8 => ActionType::And,
    0x11u8 => ActionType::Or,
    0x12u8 => ActionType::Not,
    0x13u8 => ActionType::StringEquals,
    0x14u8 => ActionType::StringLength,
    0x15u8 => ActionType::StringExtract,
    0x17u8 => ActionType::Pop,
    0x18u8 => ActionType::ToInteger,
    0x1cu8 => ActionType::GetVariable,
    0x1du8 => ActionType::SetVariable,
    0x20u8 => ActionType::SetTarget2,
    0x21u8 => ActionType::StringAdd,
    0x22u8 => ActionType::GetProperty,
    0x23u8 => ActionType::SetProperty,
    0x24u8 => ActionType::CloneSprite,
    0x25u8 => ActionType::RemoveSprite,
    0x26u8 => ActionType::Trace,
    0x27u8 => ActionType::StartDrag,
    0x28u8 => ActionType::EndDrag,
    0x29u8 => ActionType::StringLess,
    0x2au8 => ActionType::Throw,
    0x2bu8 => ActionType::CastOp,
    0x2cu8 => ActionType::ImplementsOp,
    0x30u8 => ActionType::RandomNumber,
    0x31u8 => ActionType::MbStringLength,
    0x32u8 => ActionType::CharToAscii,
    0x33u8 => ActionType::AsciiToChar,
    0x34u8 => ActionType::GetTime,
    0x35u8 => ActionType::MbStringExtract,
    0x36u8 => ActionType::MbCharToAscii,
    0x37u8 => ActionType::MbAsciiToChar,
    0x3au8 => ActionType::Delete,
    0x3bu8 => ActionType::Delete2,
    0x3cu8 => ActionType::DefineLocal,
    0x3du8 => ActionType::CallFunction,
    0x3eu8 => ActionType::Return,
    0x3fu8 => ActionType::Modulo,
    0x40u8 => ActionType::NewObject,
    0x41u8 => ActionType::DefineLocal2,
    0x42u8 => ActionType::InitArray,
    0x43u8 => ActionType::InitObject,
    0x44u8 => ActionType::TypeOf,
    0x45u8 => ActionType::TargetPath,
    0x46u8 => ActionType::Enumerate,
    0x47u8 => ActionType::Add2,
    0x48u8 => ActionType::Less2,
    0x49u8 => ActionType::Equals2,
    0x4au8 => ActionType::ToNumber,
    0x4bu8 => ActionType::ToString,
    0x4cu8 => ActionType::PushDuplicate,
    0x4du8 => ActionType::StackSwap,
    0x4eu8 => ActionType::GetMember,
    0x4fu8 => ActionType::SetMember,
    0x50u8 => ActionType::Increment,
    0x51u8 => ActionType::Decrement,
    0x52u8 => ActionType::CallMethod,
    0x53u8 => ActionType::NewMethod,
    0x54u8 => ActionType::InstanceOf,
    0x55u8 => ActionType::Enumerate2,
    0x60u8 => ActionType::BitAnd,
    0x61u8 => ActionType::BitOr,
    0x62u8 => ActionType::BitXor,
    0x63u8 => ActionType::BitLShift,
    0x64u8 => ActionType::BitRShift,
    0x65u8 => ActionType::BitUrShift,
    0x66u8 => ActionType::StrictEquals,
    0x67u8 => ActionType::Greater,
    0x68u8 => ActionType::StringGreater,
    0x69u8 => ActionType::Extends,
    0x81u8 => ActionType::GotoFrame,
    0x83u8 => ActionType::GetUrl,
    0x87u8 => ActionType::StoreRegister,
    0x88u8 => ActionType::ConstantPool,
    0x8au8 => ActionType::WaitForFrame,
    0x8bu8 => ActionType::SetTarget,
    0x8cu8 => ActionType::GotoLabel,
    0x8du8 => ActionType::WaitForFrame2,
    0x8eu8 => ActionType::DefineFunction2,
    0x8fu8 => ActionType::Try,
    0x94u8 => ActionType::With,
    0x96u8 => ActionType::Push,
    0x99u8 => ActionType::Jump,
    0x9au8 => ActionType::GetUrl2,
    0x9bu8 => ActionType::DefineFunction,
    0x9du8 => ActionType::If,
    0x9eu8 => ActionType::Call,
    0x9fu8 => ActionType::GotoFrame2,
};

/// A decoded AVM1 action.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // Payload-less opcodes.
    NextFrame,
    PreviousFrame,
    Play,
    Stop,
    ToggleQuality,
    StopSounds,
    Add,
    Subtract,
    Multiply,
    Divide,
    Equals,
    Less,
    And,
    Or,
    Not,
    StringEquals,
    StringLength,
    StringExtract,
    Pop,
    ToInteger,
    GetVariable,
    SetVariable,
    SetTarget2,
    StringAdd,
    GetProperty,
    SetProperty,
    CloneSprite,
    RemoveSprite,
    Trace,
    StartDrag,
    EndDrag,
    StringLess,
    Throw,
    CastOp,
    ImplementsOp,
    RandomNumber,
    MbStringLength,
    MbCharToAscii,
    MbStringExtract,
    MbAsciiToChar,
    CharToAscii,
    AsciiToChar,
    GetTime,
    Delete,
    Delete2,
    DefineLocal,
    CallFunction,
    Return,
    Modulo,
    NewObject,
    DefineLocal2,
    InitArray,
    InitObject,
    TypeOf,
    TargetPath,
    Enumerate,
    Add2,
    Less2,
    Equals2,
    ToNumber,
    ToString,
    PushDuplicate,
    StackSwap,
    GetMember,
    SetMember,
    Increment,
    Decrement,
    CallMethod,
    NewMethod,
    InstanceOf,
    Enumerate2,
    BitAnd,
    BitOr,
    BitXor,
    BitLShift,
    BitRShift,
    BitUrShift,
    StrictEquals,
    Greater,
    StringGreater,
    Extends,
    Call,
    // Opcodes with payloads.
    GotoFrame(u16),
    GetUrl { url: String, target: String },
    StoreRegister(u8),
    ConstantPool(Vec<String>),
    WaitForFrame { frame: u16, skip_count: u8 },
    SetTarget(String),
    GotoLabel(String),
    WaitForFrame2 { skip_count: u8 },
    DefineFunction2(DefineFunction2),
    Try(TryAction),
    With { body: Box<[u8]> },
    Push(Vec<PushValue>),
    Jump { offset: i16 },
    GetUrl2 { send_vars_method: SendVarsMethod, load_target: bool, load_variables: bool },
    DefineFunction(DefineFunction),
    If { offset: i16 },
    GotoFrame2 { play: bool, scene_bias: Option<u16> },
    /// An opcode outside the known set, skipped by its declared length.
    Unknown { code: u8, length: u16 },
}

/// Reads one action record. The record's declared payload window is
/// enforced: unread payload is skipped and overreads fail. Function bodies
/// and try blocks deliberately extend past the window by their declared
/// sizes.
pub fn read_action(reader: &mut BitReader<'_>) -> Result<Action> {
    let header = ActionHeader::read(reader)?;
    let end_pos = header.data_pos + usize::from(header.length);

    let Some(action_type) = ACTION_TYPES.get(&header.code).copied() else {
        log::warn!("swf: unknown action 0x{:02x}, skipping {} bytes", header.code, header.length);
        reader.ignore_bytes(usize::from(header.length))?;
        return Ok(Action::Unknown { code: header.code, length: header.length });
    };

    let action = match action_type {
        ActionType::NextFrame => Action::NextFrame,
        ActionType::PreviousFrame => Action::PreviousFrame,
        ActionType::Play => Action::Play,
        ActionType::Stop => Action::Stop,
        ActionType::ToggleQuality => Action::ToggleQuality,
        ActionType::StopSounds => Action::StopSounds,
        ActionType::Add => Action::Add,
        ActionType::Subtract => Action::Subtract,
        ActionType::Multiply => Action::Multiply,
        ActionType::Divide => Action::Divide,
        ActionType::Equals => Action::Equals,
        ActionType::Less => Action::Less,
        ActionType::And => Action::And,
        ActionType::Or => Action::Or,
        ActionType::Not => Action::Not,
        ActionType::StringEquals => Action::StringEquals,
        ActionType::StringLength => Action::StringLength,
        ActionType::StringExtract => Action::StringExtract,
        ActionType::Pop => Action::Pop,
        ActionType::ToInteger => Action::ToInteger,
        ActionType::GetVariable => Action::GetVariable,
        ActionType::SetVariable => Action::SetVariable,
        ActionType::SetTarget2 => Action::SetTarget2,
        ActionType::StringAdd => Action::StringAdd,
        ActionType::GetProperty => Action::GetProperty,
        ActionType::SetProperty => Action::SetProperty,
        ActionType::CloneSprite => Action::CloneSprite,
        ActionType::RemoveSprite => Action::RemoveSprite,
        ActionType::Trace => Action::Trace,
        ActionType::StartDrag => Action::StartDrag,
        ActionType::EndDrag => Action::EndDrag,
        ActionType::StringLess => Action::StringLess,
        ActionType::Throw => Action::Throw,
        ActionType::CastOp => Action::CastOp,
        ActionType::ImplementsOp => Action::ImplementsOp,
        ActionType::RandomNumber => Action::RandomNumber,
        ActionType::MbStringLength => Action::MbStringLength,
        ActionType::CharToAscii => Action::CharToAscii,
        ActionType::AsciiToChar => Action::AsciiToChar,
        ActionType::GetTime => Action::GetTime,
        ActionType::MbStringExtract => Action::MbStringExtract,
        ActionType::MbCharToAscii => Action::MbCharToAscii,
        ActionType::MbAsciiToChar => Action::MbAsciiToChar,
        ActionType::Delete => Action::Delete,
        ActionType::Delete2 => Action::Delete2,
        ActionType::DefineLocal => Action::DefineLocal,
        ActionType::CallFunction => Action::CallFunction,
        ActionType::Return => Action::Return,
        ActionType::Modulo => Action::Modulo,
        ActionType::NewObject => Action::NewObject,
        ActionType::DefineLocal2 => Action::DefineLocal2,
        ActionType::InitArray => Action::InitArray,
        ActionType::InitObject => Action::InitObject,
        ActionType::TypeOf => Action::TypeOf,
        ActionType::TargetPath => Action::TargetPath,
        ActionType::Enumerate => Action::Enumerate,
        ActionType::Add2 => Action::Add2,
        ActionType::Less2 => Action::Less2,
        ActionType::Equals2 => Action::Equals2,
        ActionType::ToNumber => Action::ToNumber,
        ActionType::ToString => Action::ToString,
        ActionType::PushDuplicate => Action::PushDuplicate,
        ActionType::StackSwap => Action::StackSwap,
        ActionType::GetMember => Action::GetMember,
        ActionType::SetMember => Action::SetMember,
        ActionType::Increment => Action::Increment,
        ActionType::Decrement => Action::Decrement,
        ActionType::CallMethod => Action::CallMethod,
        ActionType::NewMethod => Action::NewMethod,
        ActionType::InstanceOf => Action::InstanceOf,
        ActionType::Enumerate2 => Action::Enumerate2,
        ActionType::BitAnd => Action::BitAnd,
        ActionType::BitOr => Action::BitOr,
        ActionType::BitXor => Action::BitXor,
        ActionType::BitLShift => Action::BitLShift,
        ActionType::BitRShift => Action::BitRShift,
        ActionType::BitUrShift => Action::BitUrShift,
        ActionType::StrictEquals => Action::StrictEquals,
        ActionType::Greater => Action::Greater,
        ActionType::StringGreater => Action::StringGreater,
        ActionType::Extends => Action::Extends,
        ActionType::Call => Action::Call,
        ActionType::GotoFrame => Action::GotoFrame(reader.read_u16()?),
        ActionType::GetUrl => {
            let url = reader.read_length_string()?;
            let target = reader.read_length_string()?;
            Action::GetUrl { url, target }
        }
        ActionType::StoreRegister => Action::StoreRegister(reader.read_u8()?),
        ActionType::ConstantPool => {
            let count = reader.read_u16()?;
            let mut pool = Vec::with_capacity(usize::from(count));
            for _ in 0..count {
                pool.push(reader.read_nul_string()?);
            }
            Action::ConstantPool(pool)
        }
        ActionType::WaitForFrame => {
            let frame = reader.read_u16()?;
            let skip_count = reader.read_u8()?;
            Action::WaitForFrame { frame, skip_count }
        }
        ActionType::SetTarget => Action::SetTarget(reader.read_length_string()?),
        ActionType::GotoLabel => Action::GotoLabel(reader.read_length_string()?),
        ActionType::WaitForFrame2 => Action::WaitForFrame2 { skip_count: reader.read_u8()? },
        ActionType::DefineFunction2 => Action::DefineFunction2(read_define_function2(reader)?),
        ActionType::Try => Action::Try(read_try(reader)?),
        ActionType::With => {
            let size = reader.read_u16()?;
            Action::With { body: reader.read_boxed_slice(usize::from(size))? }
        }
        ActionType::Push => {
            let mut values = Vec::new();
            while reader.byte_position() < end_pos {
                values.push(PushValue::read(reader)?);
            }
            Action::Push(values)
        }
        ActionType::Jump => Action::Jump { offset: reader.read_i16()? },
        ActionType::GetUrl2 => {
            let send_vars_method = SendVarsMethod::from_bits(reader.read_ubits(2)?)?;
            reader.read_ubits(4)?; // reserved
            let load_target = reader.read_bit()?;
            let load_variables = reader.read_bit()?;
            Action::GetUrl2 { send_vars_method, load_target, load_variables }
        }
        ActionType::DefineFunction => Action::DefineFunction(read_define_function(reader)?),
        ActionType::If => Action::If { offset: reader.read_i16()? },
        ActionType::GotoFrame2 => {
            reader.read_ubits(6)?; // reserved
            let has_scene_bias = reader.read_bit()?;
            let play = reader.read_bit()?;
            let scene_bias = if has_scene_bias { Some(reader.read_u16()?) } else { None };
            Action::GotoFrame2 { play, scene_bias }
        }
    };

    // Function bodies and try blocks trail the declared payload window.
    let has_trailing_block = matches!(
        action,
        Action::DefineFunction(_) | Action::DefineFunction2(_) | Action::Try(_) | Action::With { .. }
    );

    if !has_trailing_block {
        if reader.byte_position() > end_pos {
            return decode_error("swf: action payload overread");
        }
        reader.seek_bytes(end_pos)?;
    }

    Ok(action)
}

fn read_define_function(reader: &mut BitReader<'_>) -> Result<DefineFunction> {
    let name = reader.read_nul_string()?;

    let param_count = reader.read_u16()?;
    let mut params = Vec::with_capacity(usize::from(param_count));
    for _ in 0..param_count {
        params.push(reader.read_nul_string()?);
    }

    let code_size = reader.read_u16()?;
    let body = reader.read_boxed_slice(usize::from(code_size))?;

    Ok(DefineFunction { name, params, body })
}

fn read_define_function2(reader: &mut BitReader<'_>) -> Result<DefineFunction2> {
    let name = reader.read_nul_string()?;

    let param_count = reader.read_u16()?;
    let register_count = reader.read_u8()?;
    let flags = FunctionFlags::from_bits_truncate(reader.read_ubits(16)? as u16);

    let mut params = Vec::with_capacity(usize::from(param_count));
    for _ in 0..param_count {
        let register = reader.read_u8()?;
        let name = reader.read_nul_string()?;
        params.push(RegisterParam { register, name });
    }

    let code_size = reader.read_u16()?;
    let body = reader.read_boxed_slice(usize::from(code_size))?;

    Ok(DefineFunction2 { name, register_count, flags, params, body })
}

fn read_try(reader: &mut BitReader<'_>) -> Result<TryAction> {
    reader.read_ubits(5)?; // reserved
    let catch_in_register = reader.read_bit()?;
    let _has_finally_block = reader.read_bit()?;
    let _has_catch_block = reader.read_bit()?;

    let try_size = reader.read_u16()?;
    let catch_size = reader.read_u16()?;
    let finally_size = reader.read_u16()?;

    let catch_target = if catch_in_register {
        CatchTarget::Register(reader.read_u8()?)
    }
    else {
        CatchTarget::Variable(reader.read_nul_string()?)
    };

    let try_body = reader.read_boxed_slice(usize::from(try_size))?;
    let catch_body = reader.read_boxed_slice(usize::from(catch_size))?;
    let finally_body = reader.read_boxed_slice(usize::from(finally_size))?;

    Ok(TryAction { catch_target, try_body, catch_body, finally_body })
}

/// Reads actions from a window of exactly `len` bytes, stopping early at an
/// end-of-actions marker (opcode 0). The cursor always lands at the end of
/// the window.
pub fn read_action_list(reader: &mut BitReader<'_>, len: usize) -> Result<Vec<Action>> {
    let end_pos = reader.byte_position() + len;
    let mut actions = Vec::new();

    while reader.byte_position() < end_pos {
        let code = reader.read_u8()?;
        if code == 0 {
            break;
        }
        reader.move_bytes(-1)?;

        actions.push(read_action(reader)?);
    }

    if reader.byte_position() > end_pos {
        return decode_error("swf: action list overread");
    }
    reader.seek_bytes(end_pos)?;

    Ok(actions)
}

/// One event handler of a clip action list.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipActionRecord {
    pub events: ClipEventFlags,
    pub key_code: Option<u8>,
    pub actions: Vec<Action>,
}

impl ClipActionRecord {
    /// Reads a clip action record, or `None` at the all-zero terminator.
    fn read(version: u8, reader: &mut BitReader<'_>) -> Result<Option<Self>> {
        let raw = if version >= 6 { reader.read_ubits(32)? } else { reader.read_ubits(16)? << 16 };
        if raw == 0 {
            return Ok(None);
        }
        let events = ClipEventFlags::from_bits_truncate(raw);

        let record_size = reader.read_u32()? as usize;

        let (key_code, actions_len) = if events.contains(ClipEventFlags::KEY_PRESS) {
            (Some(reader.read_u8()?), record_size.saturating_sub(1))
        }
        else {
            (None, record_size)
        };

        let actions = read_action_list(reader, actions_len)?;

        Ok(Some(ClipActionRecord { events, key_code, actions }))
    }
}

/// The clip action list of a PlaceObject2/3 tag.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipActions {
    pub all_events: ClipEventFlags,
    pub records: Vec<ClipActionRecord>,
}

impl ClipActions {
    pub fn read(version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        reader.read_u16()?; // reserved

        let all_events = ClipEventFlags::read(version, reader)?;

        let mut records = Vec::new();
        while let Some(record) = ClipActionRecord::read(version, reader)? {
            records.push(record);
        }

        Ok(ClipActions { all_events, records })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_length_only_above_0x80() {
        let mut reader = BitReader::new(&[0x06]);
        let header = ActionHeader::read(&mut reader).unwrap();
        assert_eq!((header.code, header.length), (0x06, 0));

        let mut reader = BitReader::new(&[0x81, 0x02, 0x00, 0xaa, 0xbb]);
        let header = ActionHeader::read(&mut reader).unwrap();
        assert_eq!((header.code, header.length), (0x81, 2));
        assert_eq!(header.data_pos, 3);
    }

    #[test]
    fn payload_less_opcode() {
        let mut reader = BitReader::new(&[0x06]);
        assert_eq!(read_action(&mut reader).unwrap(), Action::Play);
    }

    #[test]
    fn push_reads_until_window_exhausted() {
        let data = [
            0x96, 0x0b, 0x00, // header, length 11
            0x00, b'h', b'i', 0x00, // string "hi"
            0x07, 0x07, 0x00, 0x00, 0x00, // integer 7
            0x05, 0x01, // bool true
        ];
        let action = read_action(&mut BitReader::new(&data)).unwrap();
        assert_eq!(
            action,
            Action::Push(vec![
                PushValue::Str("hi".into()),
                PushValue::Int(7),
                PushValue::Bool(true),
            ])
        );
    }

    #[test]
    fn jump_offset_is_signed() {
        let data = [0x99, 0x02, 0x00, 0xfe, 0xff];
        let action = read_action(&mut BitReader::new(&data)).unwrap();
        assert_eq!(action, Action::Jump { offset: -2 });
    }

    #[test]
    fn constant_pool_strings() {
        let data = [0x88, 0x06, 0x00, 0x02, 0x00, b'a', 0x00, b'b', 0x00];
        let action = read_action(&mut BitReader::new(&data)).unwrap();
        assert_eq!(action, Action::ConstantPool(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn define_function_consumes_its_body() {
        let data = [
            0x9b, 0x08, 0x00, // header
            b'f', 0x00, // name
            0x01, 0x00, // one parameter
            b'x', 0x00, // parameter name
            0x02, 0x00, // code size
            0x06, 0x07, // body: Play, Stop
        ];
        let mut reader = BitReader::new(&data);
        let action = read_action(&mut reader).unwrap();

        match action {
            Action::DefineFunction(func) => {
                assert_eq!(func.name, "f");
                assert_eq!(func.params, vec!["x".to_string()]);
                assert_eq!(&func.body[..], &[0x06, 0x07]);
            }
            other => panic!("expected a function, got {:?}", other),
        }
        assert_eq!(reader.byte_position(), data.len());
    }

    #[test]
    fn try_blocks_trail_the_record() {
        let data = [
            0x8f, 0x09, 0x00, // header
            0x03, // catch + finally blocks, catch by name
            0x01, 0x00, 0x01, 0x00, 0x01, 0x00, // try/catch/finally sizes
            b'e', 0x00, // catch variable
            0x06, 0x07, 0x08, // bodies
        ];
        let action = read_action(&mut BitReader::new(&data)).unwrap();
        assert_eq!(
            action,
            Action::Try(TryAction {
                catch_target: CatchTarget::Variable("e".into()),
                try_body: Box::from(&[0x06][..]),
                catch_body: Box::from(&[0x07][..]),
                finally_body: Box::from(&[0x08][..]),
            })
        );
    }

    #[test]
    fn goto_frame2_scene_bias() {
        let data = [0x9f, 0x03, 0x00, 0x03, 0x04, 0x00];
        let action = read_action(&mut BitReader::new(&data)).unwrap();
        assert_eq!(action, Action::GotoFrame2 { play: true, scene_bias: Some(4) });
    }

    #[test]
    fn get_url2_flag_bits() {
        let data = [0x9a, 0x01, 0x00, 0x81];
        let action = read_action(&mut BitReader::new(&data)).unwrap();
        assert_eq!(
            action,
            Action::GetUrl2 {
                send_vars_method: SendVarsMethod::Post,
                load_target: false,
                load_variables: true,
            }
        );
    }

    #[test]
    fn unknown_opcode_is_skipped_not_failed() {
        let data = [0xfa, 0x02, 0x00, 0xaa, 0xbb, 0x06];
        let mut reader = BitReader::new(&data);
        assert_eq!(read_action(&mut reader).unwrap(), Action::Unknown { code: 0xfa, length: 2 });
        assert_eq!(read_action(&mut reader).unwrap(), Action::Play);
    }

    #[test]
    fn action_list_stops_at_end_marker() {
        // Play, Stop, End, then slack that must still be consumed.
        let data = [0x06, 0x07, 0x00, 0xff, 0xff];
        let mut reader = BitReader::new(&data);
        let actions = read_action_list(&mut reader, data.len()).unwrap();
        assert_eq!(actions, vec![Action::Play, Action::Stop]);
        assert_eq!(reader.byte_position(), data.len());
    }

    #[test]
    fn clip_actions_with_key_press() {
        let data = [
            0x00, 0x00, // reserved
            0x00, 0x00, 0x02, 0x00, // all events: key press
            0x00, 0x00, 0x02, 0x00, // record events: key press
            0x03, 0x00, 0x00, 0x00, // record size
            0x20, // key code
            0x06, 0x00, // Play, End
            0x00, 0x00, 0x00, 0x00, // terminator
        ];
        let mut reader = BitReader::new(&data);
        let clip_actions = ClipActions::read(6, &mut reader).unwrap();

        assert_eq!(clip_actions.all_events, ClipEventFlags::KEY_PRESS);
        assert_eq!(clip_actions.records.len(), 1);

        let record = &clip_actions.records[0];
        assert_eq!(record.events, ClipEventFlags::KEY_PRESS);
        assert_eq!(record.key_code, Some(0x20));
        assert_eq!(record.actions, vec![Action::Play]);
        assert_eq!(reader.byte_position(), data.len());
    }

    #[test]
    fn clip_actions_terminator_is_16_bits_before_swf6() {
        let data = [
            0x00, 0x00, // reserved
            0x80, 0x00, // all events: key up
            0x80, 0x00, // record events: key up
            0x01, 0x00, 0x00, 0x00, // record size
            0x00, // End
            0x00, 0x00, // terminator
        ];
        let mut reader = BitReader::new(&data);
        let clip_actions = ClipActions::read(5, &mut reader).unwrap();

        assert_eq!(clip_actions.all_events, ClipEventFlags::KEY_UP);
        assert_eq!(clip_actions.records.len(), 1);
        assert!(clip_actions.records[0].actions.is_empty());
        assert_eq!(reader.byte_position(), data.len());
    }
}
