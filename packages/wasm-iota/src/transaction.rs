//! Core programmable transaction types for IOTA
//!
//! A transaction here is the unsigned, unresolved description handed to the
//! wallet: sender, inputs and commands. The wallet resolves object versions,
//! gas payment and budget before signing, so those fields are left empty.
//!
//! The JSON form matches the dApp kit's serialized transaction (version 2):
//!
//! ```json
//! {
//!   "version": 2,
//!   "sender": "0x..",
//!   "expiration": null,
//!   "gasData": { "budget": null, "price": null, "owner": null, "payment": null },
//!   "inputs": [ { "Pure": { "bytes": "BkxhcHRvcA==" } }, { "UnresolvedObject": { "objectId": "0x.." } } ],
//!   "commands": [ { "MoveCall": { "package": "0x..", "module": "store", "function": "..", "typeArguments": [], "arguments": [ { "Input": 0 } ] } } ]
//! }
//! ```

use crate::error::WasmIotaError;
use crate::types::ObjectId;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialized transaction format version understood by the wallet
pub const TRANSACTION_JSON_VERSION: u8 = 2;

/// Reference to a value inside a programmable transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ArgumentRepr", into = "ArgumentRepr")]
pub enum Argument {
    /// The coin used to pay for gas
    GasCoin,
    /// Transaction input by index
    Input(u16),
    /// Single result of a previous command
    Result(u16),
    /// One value out of a previous command's result tuple
    NestedResult(u16, u16),
}

// Wire shape: { "GasCoin": true } | { "Input": 0 } | { "Result": 1 } | { "NestedResult": [1, 0] }
#[derive(Serialize, Deserialize)]
enum ArgumentRepr {
    GasCoin(bool),
    Input(u16),
    Result(u16),
    NestedResult(u16, u16),
}

impl From<ArgumentRepr> for Argument {
    fn from(repr: ArgumentRepr) -> Self {
        match repr {
            ArgumentRepr::GasCoin(_) => Argument::GasCoin,
            ArgumentRepr::Input(i) => Argument::Input(i),
            ArgumentRepr::Result(i) => Argument::Result(i),
            ArgumentRepr::NestedResult(i, j) => Argument::NestedResult(i, j),
        }
    }
}

impl From<Argument> for ArgumentRepr {
    fn from(arg: Argument) -> Self {
        match arg {
            Argument::GasCoin => ArgumentRepr::GasCoin(true),
            Argument::Input(i) => ArgumentRepr::Input(i),
            Argument::Result(i) => ArgumentRepr::Result(i),
            Argument::NestedResult(i, j) => ArgumentRepr::NestedResult(i, j),
        }
    }
}

/// Transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// BCS-encoded pure value
    Pure {
        #[serde(serialize_with = "serialize_base64", deserialize_with = "deserialize_base64")]
        bytes: Vec<u8>,
    },
    /// Object the wallet resolves to an owned or shared reference
    UnresolvedObject {
        #[serde(rename = "objectId")]
        object_id: ObjectId,
    },
}

impl CallArg {
    pub fn object_id(&self) -> Option<&ObjectId> {
        match self {
            CallArg::UnresolvedObject { object_id } => Some(object_id),
            CallArg::Pure { .. } => None,
        }
    }
}

/// Move function call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCall {
    pub package: ObjectId,
    pub module: String,
    pub function: String,
    #[serde(default)]
    pub type_arguments: Vec<String>,
    pub arguments: Vec<Argument>,
}

impl MoveCall {
    /// `module::function`, without the package
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.module, self.function)
    }

    /// `package::module::function`
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }
}

/// Split coin command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitCoins {
    pub coin: Argument,
    pub amounts: Vec<Argument>,
}

/// Programmable transaction command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveCall(MoveCall),
    SplitCoins(SplitCoins),
}

/// Gas settings, filled in by the wallet at signing time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasData {
    pub budget: Option<String>,
    pub price: Option<String>,
    pub owner: Option<ObjectId>,
    pub payment: Option<Vec<serde_json::Value>>,
}

/// Unsigned programmable transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    version: u8,
    sender: ObjectId,
    #[serde(default)]
    expiration: Option<serde_json::Value>,
    #[serde(default)]
    gas_data: GasData,
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
}

impl Transaction {
    pub(crate) fn new(sender: ObjectId, inputs: Vec<CallArg>, commands: Vec<Command>) -> Self {
        Transaction {
            version: TRANSACTION_JSON_VERSION,
            sender,
            expiration: None,
            gas_data: GasData::default(),
            inputs,
            commands,
        }
    }

    /// Parse a serialized transaction
    pub fn from_json(json: &str) -> Result<Self, WasmIotaError> {
        let tx: Transaction = serde_json::from_str(json)?;
        if tx.version != TRANSACTION_JSON_VERSION {
            return Err(WasmIotaError::InvalidInput(format!(
                "Unsupported transaction version {}",
                tx.version
            )));
        }
        Ok(tx)
    }

    /// Serialize for the wallet's `signAndExecuteTransaction`
    pub fn to_json(&self) -> Result<String, WasmIotaError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn sender(&self) -> &ObjectId {
        &self.sender
    }

    pub fn inputs(&self) -> &[CallArg] {
        &self.inputs
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// All move calls in command order
    pub fn move_calls(&self) -> impl Iterator<Item = &MoveCall> {
        self.commands.iter().filter_map(|c| match c {
            Command::MoveCall(call) => Some(call),
            Command::SplitCoins(_) => None,
        })
    }

    /// Input referenced by an argument, if it is an input
    pub fn input(&self, arg: &Argument) -> Option<&CallArg> {
        match arg {
            Argument::Input(i) => self.inputs.get(*i as usize),
            _ => None,
        }
    }

    /// Decode a pure u64 argument
    pub fn pure_u64(&self, arg: &Argument) -> Option<u64> {
        match self.input(arg)? {
            CallArg::Pure { bytes } => decode_u64(bytes),
            CallArg::UnresolvedObject { .. } => None,
        }
    }

    /// Decode a pure string argument
    pub fn pure_string(&self, arg: &Argument) -> Option<String> {
        match self.input(arg)? {
            CallArg::Pure { bytes } => decode_string(bytes),
            CallArg::UnresolvedObject { .. } => None,
        }
    }

    /// Object ID behind an object argument
    pub fn object_id(&self, arg: &Argument) -> Option<&ObjectId> {
        self.input(arg)?.object_id()
    }
}

/// BCS encoding of a u64 (little endian)
pub fn encode_u64(value: u64) -> Vec<u8> {
    value.to_le_bytes().to_vec()
}

/// BCS encoding of a string (ULEB128 length, then UTF-8 bytes)
pub fn encode_string(value: &str) -> Vec<u8> {
    let mut out = encode_uleb128(value.len() as u64);
    out.extend_from_slice(value.as_bytes());
    out
}

fn encode_uleb128(mut value: u64) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}

fn decode_uleb128(bytes: &[u8]) -> Option<(u64, usize)> {
    let mut value = 0u64;
    for (i, byte) in bytes.iter().enumerate().take(10) {
        value |= ((byte & 0x7f) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            return Some((value, i + 1));
        }
    }
    None
}

fn decode_u64(bytes: &[u8]) -> Option<u64> {
    let arr: [u8; 8] = bytes.try_into().ok()?;
    Some(u64::from_le_bytes(arr))
}

fn decode_string(bytes: &[u8]) -> Option<String> {
    let (len, prefix) = decode_uleb128(bytes)?;
    let body = bytes.get(prefix..)?;
    if body.len() as u64 != len {
        return None;
    }
    String::from_utf8(body.to_vec()).ok()
}

fn serialize_base64<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
}

fn deserialize_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(deserializer)?;
    base64::engine::general_purpose::STANDARD
        .decode(s)
        .map_err(serde::de::Error::custom)
}
