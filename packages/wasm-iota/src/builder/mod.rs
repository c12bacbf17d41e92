//! Programmable transaction builder
//!
//! Mirrors the wallet SDK's `Transaction` primitives (`gas`, `splitCoins`,
//! `object`, `pure.string`, `moveCall`) so store transactions can be built and
//! inspected without a browser.

use crate::error::WasmIotaError;
use crate::transaction::{
    encode_string, encode_u64, Argument, CallArg, Command, MoveCall, SplitCoins, Transaction,
};
use crate::types::ObjectId;

/// Incrementally builds a programmable transaction
#[derive(Debug, Default, Clone)]
pub struct TransactionBuilder {
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The gas coin, spendable as native IOTA
    pub fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    /// Add a BCS-encoded pure input
    pub fn pure_bytes(&mut self, bytes: Vec<u8>) -> Result<Argument, WasmIotaError> {
        self.push_input(CallArg::Pure { bytes })
    }

    /// Add a Move `String` input
    pub fn pure_string(&mut self, value: &str) -> Result<Argument, WasmIotaError> {
        self.pure_bytes(encode_string(value))
    }

    /// Add a Move `u64` input
    pub fn pure_u64(&mut self, value: u64) -> Result<Argument, WasmIotaError> {
        self.pure_bytes(encode_u64(value))
    }

    /// Reference an on-chain object by ID
    ///
    /// The same object always maps to the same input, as the chain rejects
    /// transactions that list an object twice.
    pub fn object(&mut self, id: &str) -> Result<Argument, WasmIotaError> {
        let object_id: ObjectId = id.parse()?;
        self.object_id(object_id)
    }

    /// Reference an already parsed object ID
    pub fn object_id(&mut self, object_id: ObjectId) -> Result<Argument, WasmIotaError> {
        if let Some(index) = self
            .inputs
            .iter()
            .position(|input| input.object_id() == Some(&object_id))
        {
            return Ok(Argument::Input(index as u16));
        }
        self.push_input(CallArg::UnresolvedObject { object_id })
    }

    /// Split `amounts` off `coin`, returning one new coin per amount
    pub fn split_coins(
        &mut self,
        coin: Argument,
        amounts: &[u64],
    ) -> Result<Vec<Argument>, WasmIotaError> {
        if amounts.is_empty() {
            return Err(WasmIotaError::InvalidInput(
                "splitCoins needs at least one amount".to_string(),
            ));
        }
        self.check_argument(&coin)?;

        let amounts = amounts
            .iter()
            .map(|amount| self.pure_u64(*amount))
            .collect::<Result<Vec<_>, _>>()?;
        let count = amounts.len();
        let index = self.push_command(Command::SplitCoins(SplitCoins { coin, amounts }))?;

        Ok((0..count)
            .map(|i| Argument::NestedResult(index, i as u16))
            .collect())
    }

    /// Call `package::module::function` with positional arguments
    ///
    /// # Arguments
    /// * `target` - Fully qualified function, e.g. `0x2::token::join`
    /// * `type_arguments` - Type tags for generic functions
    /// * `arguments` - Inputs or results of earlier commands
    pub fn move_call(
        &mut self,
        target: &str,
        type_arguments: &[String],
        arguments: Vec<Argument>,
    ) -> Result<Argument, WasmIotaError> {
        let (package, module, function) = parse_target(target)?;
        for arg in &arguments {
            self.check_argument(arg)?;
        }
        if type_arguments.iter().any(|t| t.trim().is_empty()) {
            return Err(WasmIotaError::InvalidInput(format!(
                "Empty type argument for {}",
                target
            )));
        }

        let index = self.push_command(Command::MoveCall(MoveCall {
            package,
            module,
            function,
            type_arguments: type_arguments.to_vec(),
            arguments,
        }))?;
        Ok(Argument::Result(index))
    }

    /// Finish the transaction for `sender`
    pub fn build(self, sender: &str) -> Result<Transaction, WasmIotaError> {
        let sender: ObjectId = sender
            .parse()
            .map_err(|_| WasmIotaError::InvalidInput(format!("Invalid sender: {}", sender)))?;
        if self.commands.is_empty() {
            return Err(WasmIotaError::InvalidInput(
                "Transaction has no commands".to_string(),
            ));
        }
        Ok(Transaction::new(sender, self.inputs, self.commands))
    }

    fn push_input(&mut self, input: CallArg) -> Result<Argument, WasmIotaError> {
        let index = u16::try_from(self.inputs.len())
            .map_err(|_| WasmIotaError::InvalidInput("Too many inputs".to_string()))?;
        self.inputs.push(input);
        Ok(Argument::Input(index))
    }

    fn push_command(&mut self, command: Command) -> Result<u16, WasmIotaError> {
        let index = u16::try_from(self.commands.len())
            .map_err(|_| WasmIotaError::InvalidInput("Too many commands".to_string()))?;
        self.commands.push(command);
        Ok(index)
    }

    fn check_argument(&self, arg: &Argument) -> Result<(), WasmIotaError> {
        let valid = match *arg {
            Argument::GasCoin => true,
            Argument::Input(i) => (i as usize) < self.inputs.len(),
            Argument::Result(i) => (i as usize) < self.commands.len(),
            Argument::NestedResult(i, j) => match self.commands.get(i as usize) {
                Some(Command::SplitCoins(split)) => (j as usize) < split.amounts.len(),
                Some(Command::MoveCall(_)) => true,
                None => false,
            },
        };
        if valid {
            Ok(())
        } else {
            Err(WasmIotaError::InvalidArgument(format!("{:?}", arg)))
        }
    }
}

/// Split `package::module::function`, normalizing the package ID
fn parse_target(target: &str) -> Result<(ObjectId, String, String), WasmIotaError> {
    let parts: Vec<&str> = target.split("::").collect();
    let [package, module, function] = parts.as_slice() else {
        return Err(WasmIotaError::InvalidTarget(target.to_string()));
    };
    if !is_identifier(module) || !is_identifier(function) {
        return Err(WasmIotaError::InvalidTarget(target.to_string()));
    }
    let package: ObjectId = package.parse()?;
    Ok((package, module.to_string(), function.to_string()))
}

/// Move identifier: `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
