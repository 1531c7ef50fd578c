use anyhow::{Result, bail};

/// Line accumulator with a current indent level in units of four spaces.
pub struct IndentedEmitter {
    output: String,
    indent: usize,
}

impl IndentedEmitter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    pub fn emit(&mut self, line: &str) {
        for _ in 0..self.indent {
            self.output.push_str("    ");
        }
        self.output.push_str(line);
        self.output.push('\n');
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) -> Result<()> {
        if self.indent == 0 {
            bail!("Indentation underflow");
        }
        self.indent -= 1;
        Ok(())
    }

    pub fn finish(self) -> String {
        self.output
    }
}

impl Default for IndentedEmitter {
    fn default() -> Self {
        Self::new()
    }
}
