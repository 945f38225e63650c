#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

use anyhow::anyhow;
use anyhow::Result;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        let prefix = args[0].to_string();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_image()
            || cmd.is_select()
            || cmd.is_listing()
            || cmd.is_refine()
            || cmd.is_regenerate()
            || cmd.is_clear_chat()
            || cmd.is_export()
            || cmd.is_copy()
            || cmd.is_status()
            || cmd.is_api_key()
            || cmd.is_model_list()
            || cmd.is_vision_model_set()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Arguments joined back together, so paths and chat text keep their
    /// inner spaces.
    pub fn arg_text(&self) -> String {
        return self.args.join(" ").trim().to_string();
    }

    /// Resolves `1`, `1,3,5`, `2..4` style arguments to zero based indexes
    /// into a list of `len` entries.
    pub fn indexes(&self, len: usize) -> Result<Vec<usize>> {
        let mut indexes: Vec<usize> = vec![];
        for arg in self.args.iter() {
            for part in arg.split(',') {
                let trimmed = part.trim();
                if trimmed.is_empty() {
                    continue;
                }

                if trimmed.contains("..") {
                    let split = trimmed.split("..").collect::<Vec<&str>>();
                    let first = split[0].parse::<usize>()?;
                    let last = split[1].parse::<usize>()?;
                    if first < 1 || last < first {
                        return Err(anyhow!(format!("{trimmed} is not a valid range")));
                    }
                    indexes.extend((first - 1)..last);
                } else {
                    let idx = trimmed.parse::<usize>()?;
                    if idx < 1 {
                        return Err(anyhow!("Item numbers start at 1"));
                    }
                    indexes.push(idx - 1);
                }
            }
        }

        for index in indexes.iter() {
            if *index >= len {
                return Err(anyhow!(format!("{} is out of bounds.", index + 1)));
            }
        }

        return Ok(indexes);
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_image(&self) -> bool {
        return ["/i", "/image"].contains(&self.command.as_str());
    }

    pub fn is_select(&self) -> bool {
        return ["/s", "/select"].contains(&self.command.as_str());
    }

    pub fn is_listing(&self) -> bool {
        return ["/l", "/listing"].contains(&self.command.as_str());
    }

    pub fn is_refine(&self) -> bool {
        return ["/rf", "/refine"].contains(&self.command.as_str());
    }

    pub fn is_regenerate(&self) -> bool {
        return ["/r", "/regen", "/regenerate"].contains(&self.command.as_str());
    }

    pub fn is_clear_chat(&self) -> bool {
        return ["/clear"].contains(&self.command.as_str());
    }

    pub fn is_export(&self) -> bool {
        return ["/e", "/export"].contains(&self.command.as_str());
    }

    pub fn is_copy(&self) -> bool {
        return ["/c", "/copy"].contains(&self.command.as_str());
    }

    pub fn is_status(&self) -> bool {
        return ["/st", "/status"].contains(&self.command.as_str());
    }

    pub fn is_api_key(&self) -> bool {
        return ["/k", "/key"].contains(&self.command.as_str());
    }

    pub fn is_model_list(&self) -> bool {
        return ["/ml", "/models", "/modellist"].contains(&self.command.as_str());
    }

    pub fn is_vision_model_set(&self) -> bool {
        return ["/v", "/vision"].contains(&self.command.as_str());
    }
}
