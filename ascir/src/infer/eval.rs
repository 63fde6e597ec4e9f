//! In-process evaluation of dtype inference plans.
//!
//! An empty output list is filled (inference); a non-empty one is checked
//! against what inference allows (validation).
use crate::dtype::DataType;
use crate::error::InferError;

use super::plan::{
    DtypeInferPlan, DtypeStrategy, LegalityTable, OrderedTable, OutputRule, OutputSource,
};
use super::probe::ArchProbe;

type InferResult = Result<(), InferError>;

impl DtypeInferPlan {
    pub fn infer<P: ArchProbe + ?Sized>(
        &self,
        inputs: &[DataType],
        outputs: &mut Vec<DataType>,
        probe: &P,
    ) -> InferResult {
        self.run(inputs, outputs, probe).map_err(|err| self.report(err))
    }

    /// Input consistency only. Fails for every strategy except uniqueness.
    pub fn infer_with_no_check(
        &self,
        inputs: &[DataType],
        outputs: &mut Vec<DataType>,
    ) -> InferResult {
        self.run_no_check(inputs, outputs)
            .map_err(|err| self.report(err))
    }

    fn report(&self, err: InferError) -> InferError {
        if err.is_contract_violation() {
            crate::error!("{err}");
        } else {
            crate::warning!("{err}");
        }
        err
    }

    fn run<P: ArchProbe + ?Sized>(
        &self,
        inputs: &[DataType],
        outputs: &mut Vec<DataType>,
        probe: &P,
    ) -> InferResult {
        self.check_arity(inputs, outputs)?;
        self.check_groups(inputs)?;
        match &self.strategy {
            DtypeStrategy::Uniqueness(tables) => {
                let table = match tables.as_slice() {
                    [only] if only.soc_versions.is_empty() => only,
                    _ => self.table_for_soc(tables, |table| table.soc_versions.as_slice(), probe)?,
                };
                self.check_legal(table, inputs)?;
                let rules = &table.outputs;
                let mut inferred = Vec::with_capacity(rules.len());
                let mut ambiguous = false;
                for rule in rules {
                    match &rule.source {
                        OutputSource::Input(index) => inferred.push(Some(inputs[*index])),
                        OutputSource::Const(dtype) => inferred.push(Some(*dtype)),
                        OutputSource::Ambiguous(_) => {
                            ambiguous = true;
                            inferred.push(None);
                        }
                    }
                }
                if outputs.is_empty() {
                    if ambiguous {
                        return Err(InferError::Ambiguous {
                            op: self.op.clone(),
                        });
                    }
                    outputs.extend(inferred.into_iter().flatten());
                    return Ok(());
                }
                self.validate_rules(rules, inputs, outputs)
            }
            DtypeStrategy::Ordered { key_inputs, table } => {
                self.lookup(table, key_inputs, inputs, outputs)
            }
            DtypeStrategy::PerSocOrdered { key_inputs, tables } => {
                let table = self.table_for_soc(tables, |table| table.soc_versions.as_slice(), probe)?;
                self.lookup(table, key_inputs, inputs, outputs)
            }
            DtypeStrategy::Policy(policies) => {
                let inferred = policies
                    .iter()
                    .map(|policy| policy.apply(inputs))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| InferError::InputArity {
                        op: self.op.clone(),
                        expected: self.input_num,
                        actual: inputs.len(),
                    })?;
                if outputs.is_empty() {
                    *outputs = inferred;
                    Ok(())
                } else if *outputs == inferred {
                    Ok(())
                } else {
                    Err(self.mismatch(inputs, outputs))
                }
            }
        }
    }

    fn run_no_check(&self, inputs: &[DataType], outputs: &[DataType]) -> InferResult {
        if !self.strategy.supports_no_check() {
            return Err(InferError::NoCheckUnsupported {
                op: self.op.clone(),
            });
        }
        self.check_arity(inputs, outputs)?;
        self.check_groups(inputs)
    }

    fn check_arity(&self, inputs: &[DataType], outputs: &[DataType]) -> InferResult {
        let inputs_ok = inputs.len() == self.input_num || (self.start_node && inputs.is_empty());
        if !inputs_ok {
            return Err(InferError::InputArity {
                op: self.op.clone(),
                expected: self.input_num,
                actual: inputs.len(),
            });
        }
        if !outputs.is_empty() && outputs.len() != self.output_num {
            return Err(InferError::OutputArity {
                op: self.op.clone(),
                expected: self.output_num,
                actual: outputs.len(),
            });
        }
        Ok(())
    }

    /// Inputs sharing a symbol must agree.
    fn check_groups(&self, inputs: &[DataType]) -> InferResult {
        for group in &self.groups {
            let dtypes = group
                .inputs
                .iter()
                .map(|index| inputs[*index])
                .collect::<Vec<_>>();
            if dtypes.windows(2).any(|pair| pair[0] != pair[1]) {
                return Err(InferError::SymbolMismatch {
                    op: self.op.clone(),
                    symbol: group.symbol.clone(),
                    dtypes,
                });
            }
        }
        Ok(())
    }

    /// The table whose soc versions contain the probed one.
    fn table_for_soc<'a, T, P: ArchProbe + ?Sized>(
        &self,
        tables: &'a [T],
        soc_versions: impl Fn(&T) -> &[String],
        probe: &P,
    ) -> Result<&'a T, InferError> {
        let soc = probe
            .soc_version()
            .map_err(|code| InferError::ArchProbe { code })?;
        tables
            .iter()
            .find(|table| soc_versions(table).iter().any(|known| *known == soc))
            .ok_or_else(|| InferError::UnknownSocVersion {
                op: self.op.clone(),
                soc: soc.clone(),
            })
    }

    fn check_legal(&self, table: &LegalityTable, inputs: &[DataType]) -> InferResult {
        for (group, legal) in self.groups.iter().zip(&table.legal) {
            let dtype = inputs[group.inputs[0]];
            if !legal.contains(&dtype) {
                return Err(InferError::UnsupportedDtype {
                    op: self.op.clone(),
                    symbol: group.symbol.clone(),
                    dtype,
                });
            }
        }
        Ok(())
    }

    fn validate_rules(
        &self,
        rules: &[OutputRule],
        inputs: &[DataType],
        outputs: &[DataType],
    ) -> InferResult {
        for (index, rule) in rules.iter().enumerate() {
            let actual = outputs[index];
            let ok = match &rule.source {
                OutputSource::Input(input) => {
                    inputs.get(*input).map_or(true, |dtype| *dtype == actual)
                }
                OutputSource::Const(dtype) => *dtype == actual,
                OutputSource::Ambiguous(legal) => legal.contains(&actual),
            };
            // outputs sharing an output-only symbol must agree with each other
            let consistent = rules[..index]
                .iter()
                .zip(outputs)
                .filter(|(earlier, _)| earlier.symbol == rule.symbol)
                .all(|(_, dtype)| *dtype == actual);
            if !ok || !consistent {
                return Err(self.mismatch(inputs, outputs));
            }
        }
        Ok(())
    }

    fn lookup(
        &self,
        table: &OrderedTable,
        key_inputs: &[usize],
        inputs: &[DataType],
        outputs: &mut Vec<DataType>,
    ) -> InferResult {
        let key = key_inputs
            .iter()
            .map(|index| inputs[*index])
            .collect::<Vec<_>>();
        let candidates = table
            .candidates(&key)
            .ok_or_else(|| InferError::UnsupportedInputs {
                op: self.op.clone(),
                inputs: inputs.to_vec(),
            })?;
        if outputs.is_empty() {
            return match candidates {
                [only] => {
                    *outputs = only.clone();
                    Ok(())
                }
                _ => Err(InferError::Ambiguous {
                    op: self.op.clone(),
                }),
            };
        }
        if candidates.iter().any(|candidate| candidate == outputs) {
            Ok(())
        } else {
            Err(self.mismatch(inputs, outputs))
        }
    }

    fn mismatch(&self, inputs: &[DataType], outputs: &[DataType]) -> InferError {
        InferError::OutputMismatch {
            op: self.op.clone(),
            inputs: inputs.to_vec(),
            outputs: outputs.to_vec(),
        }
    }
}
