use std::collections::VecDeque;

/// One drawing command for the external renderer. Units are opaque to
/// the machine: coordinates are whatever the program's pixel space is,
/// colors are RGB-packed.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphicsCommand {
    PutPixel { x: i32, y: i32 },
    PutLine { x0: i32, y0: i32, x1: i32, y1: i32 },
    PutRect { x: i32, y: i32, width: i32, height: i32 },
    DrawText(String),
    SetColor(u32),
    Clear,
}

impl std::fmt::Display for GraphicsCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use GraphicsCommand::*;
        match self {
            PutPixel { x, y } => write!(f, "PUTPIXEL({}, {})", x, y),
            PutLine { x0, y0, x1, y1 } => write!(f, "PUTLINE({}, {}, {}, {})", x0, y0, x1, y1),
            PutRect {
                x,
                y,
                width,
                height,
            } => write!(f, "PUTRECT({}, {}, {}, {})", x, y, width, height),
            DrawText(s) => write!(f, "DRAWTEXT({})", s),
            SetColor(c) => write!(f, "SETCOLOR({:#08X})", c),
            Clear => write!(f, "CLEAR"),
        }
    }
}

/// ## Graphics command queue
///
/// FIFO between the machine (producer) and an external renderer
/// (consumer). Single producer, single consumer, no backpressure: the
/// machine never blocks on enqueue and the renderer is expected to
/// drain between frames.
#[derive(Debug, Default)]
pub struct Graphics {
    queue: VecDeque<GraphicsCommand>,
}

impl Graphics {
    pub fn new() -> Graphics {
        Graphics::default()
    }

    pub fn enqueue(&mut self, command: GraphicsCommand) {
        self.queue.push_back(command);
    }

    /// Consumer side: oldest command first, ownership transfers out.
    pub fn pop(&mut self) -> Option<GraphicsCommand> {
        self.queue.pop_front()
    }

    /// Remove and discard everything queued, without delivery.
    pub fn drain_all(&mut self) {
        self.queue.clear();
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
