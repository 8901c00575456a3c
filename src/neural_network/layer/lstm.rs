use super::*;

/// Threshold for using parallel computation in LSTM layer.
/// When batch_size * units < this value, sequential execution is used.
/// When batch_size * units >= this value, the four gates are computed in parallel.
const LSTM_PARALLEL_THRESHOLD: usize = 1024;

/// Parameters of a single LSTM gate
///
/// # Fields
///
/// - `kernel` - Weight matrix for input connections with shape (input_dim, units)
/// - `recurrent_kernel` - Weight matrix for recurrent connections with shape (units, units)
/// - `bias` - Bias vector with shape (1, units)
pub struct Gate {
    pub kernel: Array2<f32>,
    pub recurrent_kernel: Array2<f32>,
    pub bias: Array2<f32>,
}

impl Gate {
    /// Creates a gate with Glorot-uniform kernels and a constant bias
    fn new(input_dim: usize, units: usize, bias_init_value: f32) -> Self {
        Self {
            kernel: glorot_uniform(input_dim, units),
            recurrent_kernel: glorot_uniform(units, units),
            bias: Array2::from_elem((1, units), bias_init_value),
        }
    }

    /// Computes `x_t · kernel + h_prev · recurrent_kernel + bias`
    fn pre_activation(&self, x_t: &Array2<f32>, h_prev: &Array2<f32>) -> Array2<f32> {
        x_t.dot(&self.kernel) + h_prev.dot(&self.recurrent_kernel) + &self.bias
    }

    fn weights(&self) -> LSTMGateWeight<'_> {
        LSTMGateWeight {
            kernel: &self.kernel,
            recurrent_kernel: &self.recurrent_kernel,
            bias: &self.bias,
        }
    }
}

/// Long Short-Term Memory (LSTM) layer, forward pass only
///
/// For each timestep t:
/// 1. i_t = σ(x_t · W_i + h_{t-1} · U_i + b_i)  (Input gate)
/// 2. f_t = σ(x_t · W_f + h_{t-1} · U_f + b_f)  (Forget gate)
/// 3. g_t = act(x_t · W_c + h_{t-1} · U_c + b_c)  (Cell gate)
/// 4. o_t = σ(x_t · W_o + h_{t-1} · U_o + b_o)  (Output gate)
/// 5. C_t = f_t ⊙ C_{t-1} + i_t ⊙ g_t
/// 6. h_t = o_t ⊙ act(C_t)
///
/// where σ is the recurrent activation (sigmoid by default) and act is the activation (tanh by
/// default). Input shape is `[batch_size, steps, input_dim]`; output shape is
/// `[batch_size, units]`, or `[batch_size, steps, units]` when `return_sequences` is set.
///
/// # Fields
///
/// - `input_dim` - Dimensionality of input features
/// - `units` - Number of LSTM units
/// - `input_gate` - Gate controlling what new information to store in cell state
/// - `forget_gate` - Gate controlling what information to discard from cell state
/// - `cell_gate` - Gate proposing new candidate values for cell state
/// - `output_gate` - Gate controlling what to output from cell state
/// - `activation` - Activation of the cell gate and the cell state
/// - `recurrent_activation` - Activation of the input, forget and output gates
/// - `return_sequences` - Whether to return the hidden state of every timestep
///
/// # Example
/// ```rust
/// use rustysentiment::neural_network::*;
/// use ndarray::Array;
///
/// // batch_size=2, timesteps=5, features=4
/// let input = Array::ones((2, 5, 4)).into_dyn();
///
/// let lstm = LSTM::new(4, 3, false).unwrap();
/// let output = lstm.forward(&input).unwrap();
/// assert_eq!(output.shape(), &[2, 3]);
/// ```
pub struct LSTM {
    input_dim: usize,
    units: usize,

    // Four gates: input, forget, cell, output
    input_gate: Gate,
    forget_gate: Gate,
    cell_gate: Gate,
    output_gate: Gate,

    activation: Activation,
    recurrent_activation: Activation,
    return_sequences: bool,
}

impl LSTM {
    /// Creates a new LSTM layer with randomly initialized weights
    ///
    /// The forget gate bias starts at 1.0 and the activations are tanh and sigmoid, matching
    /// the Keras defaults.
    ///
    /// # Parameters
    ///
    /// - `input_dim` - Number of features per timestep
    /// - `units` - Number of LSTM units
    /// - `return_sequences` - Whether to return the full sequence of hidden states
    ///
    /// # Returns
    ///
    /// - `Ok(LSTM)` - The new layer
    /// - `Err(ModelError::InvalidArgument)` - If `input_dim` or `units` is 0
    pub fn new(input_dim: usize, units: usize, return_sequences: bool) -> Result<Self, ModelError> {
        validate_dimension_greater_than_zero(input_dim, "input_dim")?;
        validate_dimension_greater_than_zero(units, "units")?;

        Ok(Self {
            input_dim,
            units,
            input_gate: Gate::new(input_dim, units, 0.0),
            forget_gate: Gate::new(input_dim, units, 1.0),
            cell_gate: Gate::new(input_dim, units, 0.0),
            output_gate: Gate::new(input_dim, units, 0.0),
            activation: Activation::Tanh,
            recurrent_activation: Activation::Sigmoid,
            return_sequences,
        })
    }

    /// Builds an LSTM layer from weights in the Keras layout
    ///
    /// Keras concatenates the four gates along the last axis in the order input, forget,
    /// cell, output.
    ///
    /// # Parameters
    ///
    /// - `kernel` - Input kernel with shape (input_dim, 4 * units)
    /// - `recurrent_kernel` - Recurrent kernel with shape (units, 4 * units)
    /// - `bias` - Optional bias with shape (4 * units); zeros when absent
    /// - `activation` - Activation of the cell gate and cell state
    /// - `recurrent_activation` - Activation of the input, forget and output gates
    /// - `return_sequences` - Whether to return the full sequence of hidden states
    ///
    /// # Returns
    ///
    /// - `Ok(LSTM)` - The layer
    /// - `Err(ModelError::InvalidArgument)` - If the weight shapes are inconsistent
    pub fn from_keras_weights(
        kernel: Array2<f32>,
        recurrent_kernel: Array2<f32>,
        bias: Option<Array1<f32>>,
        activation: Activation,
        recurrent_activation: Activation,
        return_sequences: bool,
    ) -> Result<Self, ModelError> {
        let (input_dim, gate_width) = kernel.dim();
        if gate_width == 0 || gate_width % 4 != 0 {
            return Err(ModelError::InvalidArgument(format!(
                "LSTM kernel width must be a positive multiple of 4, got {}",
                gate_width
            )));
        }
        let units = gate_width / 4;
        validate_dimension_greater_than_zero(input_dim, "input_dim")?;
        validate_weight_shape(recurrent_kernel.shape(), &[units, gate_width], "LSTM recurrent kernel")?;

        let bias = match bias {
            Some(b) => {
                validate_weight_shape(b.shape(), &[gate_width], "LSTM bias")?;
                b
            }
            None => Array1::zeros(gate_width),
        };

        let gate = |index: usize| {
            let range = index * units..(index + 1) * units;
            Gate {
                kernel: kernel.slice(ndarray::s![.., range.clone()]).to_owned(),
                recurrent_kernel: recurrent_kernel.slice(ndarray::s![.., range.clone()]).to_owned(),
                bias: bias
                    .slice(ndarray::s![range])
                    .to_owned()
                    .insert_axis(Axis(0)),
            }
        };

        Ok(Self {
            input_dim,
            units,
            input_gate: gate(0),
            forget_gate: gate(1),
            cell_gate: gate(2),
            output_gate: gate(3),
            activation,
            recurrent_activation,
            return_sequences,
        })
    }

    /// Returns the number of input features
    pub fn get_input_dim(&self) -> usize {
        self.input_dim
    }

    /// Returns the number of units
    pub fn get_units(&self) -> usize {
        self.units
    }

    /// Returns whether every timestep is returned
    pub fn get_return_sequences(&self) -> bool {
        self.return_sequences
    }
}

impl Layer for LSTM {
    fn forward(&self, input: &Tensor) -> Result<Tensor, ModelError> {
        validate_input_ndim(input, 3, "LSTM")?;
        let x3 = input
            .view()
            .into_dimensionality::<Ix3>()
            .map_err(|e| ModelError::ProcessingError(e.to_string()))?;

        let (batch, timesteps, features) = x3.dim();
        if features != self.input_dim {
            return Err(ModelError::InvalidArgument(format!(
                "LSTM expects {} input features, got {}",
                self.input_dim, features
            )));
        }

        let mut h_prev = Array2::<f32>::zeros((batch, self.units));
        let mut c_prev = Array2::<f32>::zeros((batch, self.units));
        let mut sequence = if self.return_sequences {
            Some(Array3::<f32>::zeros((batch, timesteps, self.units)))
        } else {
            None
        };

        // Determine whether to use parallel execution based on computational load
        let use_parallel = batch * self.units >= LSTM_PARALLEL_THRESHOLD;

        let gate_output = |gate: &Gate, x_t: &Array2<f32>, h: &Array2<f32>, act: &Activation| {
            let mut z = gate.pre_activation(x_t, h);
            Activation::apply_activation_inplace(&mut z, act);
            z
        };

        for t in 0..timesteps {
            let x_t = x3.index_axis(Axis(1), t).to_owned(); // (batch, input_dim)
            let recurrent = &self.recurrent_activation;

            let (i_t, f_t, g_t, o_t) = if use_parallel {
                let ((i_t, f_t), (g_t, o_t)) = rayon::join(
                    || {
                        rayon::join(
                            || gate_output(&self.input_gate, &x_t, &h_prev, recurrent),
                            || gate_output(&self.forget_gate, &x_t, &h_prev, recurrent),
                        )
                    },
                    || {
                        rayon::join(
                            || gate_output(&self.cell_gate, &x_t, &h_prev, &self.activation),
                            || gate_output(&self.output_gate, &x_t, &h_prev, recurrent),
                        )
                    },
                );
                (i_t, f_t, g_t, o_t)
            } else {
                (
                    gate_output(&self.input_gate, &x_t, &h_prev, recurrent),
                    gate_output(&self.forget_gate, &x_t, &h_prev, recurrent),
                    gate_output(&self.cell_gate, &x_t, &h_prev, &self.activation),
                    gate_output(&self.output_gate, &x_t, &h_prev, recurrent),
                )
            };

            // c_t = f_t * c_prev + i_t * g_t
            let c_t = &f_t * &c_prev + &i_t * &g_t;
            // h_t = o_t * act(c_t)
            let h_t = &o_t * &Activation::apply_activation(&c_t, &self.activation);

            if let Some(seq) = sequence.as_mut() {
                seq.index_axis_mut(Axis(1), t).assign(&h_t);
            }

            h_prev = h_t;
            c_prev = c_t;
        }

        Ok(match sequence {
            Some(seq) => seq.into_dyn(),
            None => h_prev.into_dyn(),
        })
    }

    fn layer_type(&self) -> &str {
        "LSTM"
    }

    fn output_shape(&self) -> String {
        if self.return_sequences {
            format!("(None, None, {})", self.units)
        } else {
            format!("(None, {})", self.units)
        }
    }

    fn param_count(&self) -> usize {
        4 * (self.input_dim * self.units + self.units * self.units + self.units)
    }

    fn get_weights(&self) -> LayerWeight<'_> {
        LayerWeight::LSTM(LSTMLayerWeight {
            input: self.input_gate.weights(),
            forget: self.forget_gate.weights(),
            cell: self.cell_gate.weights(),
            output: self.output_gate.weights(),
        })
    }
}
