use log::debug;

use crate::player::{
    avm::{
        environment::ScriptEnvironment,
        error::ScriptError,
        interpreter::Interpreter,
        opcode::{ActionCode, ActionRecord},
        value::Value,
    },
    movie_clip::MovieClipNode,
};

pub struct ControlActionHandlers {}

/// Frame actions against an unresolved SetTarget path do nothing.
fn with_target(env: &mut ScriptEnvironment, action: &ActionRecord, f: impl FnOnce(&mut MovieClipNode)) {
    match env.target() {
        Some(clip) => f(clip),
        None => debug!(
            "Action 0x{:02X} at {} ignored: no target",
            action.code, action.pc
        ),
    }
}

impl ControlActionHandlers {
    pub fn register(interpreter: &mut Interpreter) {
        interpreter.register(ActionCode::NextFrame, Self::next_frame);
        interpreter.register(ActionCode::PrevFrame, Self::prev_frame);
        interpreter.register(ActionCode::Play, Self::play);
        interpreter.register(ActionCode::Stop, Self::stop);
        interpreter.register(ActionCode::ToggleQuality, Self::no_op);
        interpreter.register(ActionCode::StopSounds, Self::no_op);
        interpreter.register(ActionCode::GotoFrame, Self::goto_frame);
        interpreter.register(ActionCode::GetUrl, Self::get_url);
        interpreter.register(ActionCode::WaitForFrame, Self::wait_for_frame);
        interpreter.register(ActionCode::SetTarget, Self::set_target);
        interpreter.register(ActionCode::GotoLabel, Self::goto_label);
        interpreter.register(ActionCode::Jump, Self::jump);
        interpreter.register(ActionCode::If, Self::if_true);
        interpreter.register(ActionCode::Call, Self::call);
    }

    pub fn next_frame(env: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        with_target(env, action, |clip| clip.next_frame());
        Ok(())
    }

    pub fn prev_frame(env: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        with_target(env, action, |clip| clip.prev_frame());
        Ok(())
    }

    pub fn play(env: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        with_target(env, action, |clip| clip.play());
        Ok(())
    }

    pub fn stop(env: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        with_target(env, action, |clip| clip.stop());
        Ok(())
    }

    /// Quality and sound have no counterpart here.
    pub fn no_op(_: &mut ScriptEnvironment, _: &ActionRecord) -> Result<(), ScriptError> {
        Ok(())
    }

    /// The operand is a 0-based frame index.
    pub fn goto_frame(env: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        let frame = action.operands().read_u16()?.saturating_add(1);
        with_target(env, action, |clip| clip.goto_frame(frame));
        Ok(())
    }

    pub fn get_url(_: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        let mut operands = action.operands();
        let url = operands.read_string()?;
        let window = operands.read_string()?;
        debug!("GetUrl {:?} (window {:?}) ignored", url, window);
        Ok(())
    }

    /// Everything is loaded up front, so the skip count never applies.
    pub fn wait_for_frame(_: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        let mut operands = action.operands();
        let frame = operands.read_u16()?;
        let skip = operands.read_u8()?;
        debug!("WaitForFrame {} (skip {}): frame is loaded", frame, skip);
        Ok(())
    }

    pub fn set_target(env: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        let path = action.operands().read_string()?;
        env.set_target(&path);
        Ok(())
    }

    pub fn goto_label(env: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        let label = action.operands().read_string()?;
        with_target(env, action, |clip| {
            clip.goto_label(&label);
        });
        Ok(())
    }

    pub fn jump(env: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        let offset = action.operands().read_i16()?;
        env.jump(offset)
    }

    pub fn if_true(env: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        let offset = action.operands().read_i16()?;
        if env.pop()?.to_bool() {
            env.jump(offset)?;
        }
        Ok(())
    }

    /// Runs the actions of a frame, given by number or label, on the current
    /// target without moving its playhead.
    pub fn call(env: &mut ScriptEnvironment, action: &ActionRecord) -> Result<(), ScriptError> {
        let frame = env.pop()?;
        let call_depth = env.call_depth();
        let clip = match env.target() {
            Some(clip) => clip,
            None => {
                debug!("Call at {} ignored: no target", action.pc);
                return Ok(());
            }
        };

        let frame_number = match &frame {
            Value::Str(label) => match label.trim().parse::<f64>() {
                Ok(number) => Some(number as u16),
                Err(_) => clip.definition().frame_for_label(label),
            },
            other => Some(other.to_number() as u16),
        };
        match frame_number {
            Some(frame_number) => clip.call_frame(frame_number, call_depth),
            None => {
                debug!("Call to unknown frame {}", frame);
                Ok(())
            }
        }
    }
}
